use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{types::AuthRequest, warning};

/// Receives the redirect from the identity provider.
///
/// Verifies the echoed `state` nonce against the login attempt and stashes
/// the authorization code for the waiting CLI flow to pick up. The code
/// itself is not exchanged here; that decision belongs to the session
/// manager.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthRequest>>>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was declined: {}", reason);
        return Html("<h4>Authorization was declined.</h4>");
    }

    let mut state = shared_state.lock().await;
    let Some(ref mut auth_request) = state.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    if params.get("state") != Some(&auth_request.state) {
        warning!("Callback state nonce did not match; ignoring redirect.");
        return Html("<h4>State mismatch. Please retry the login.</h4>");
    }

    match params.get("code") {
        Some(code) => {
            auth_request.code = Some(code.clone());
            Html("<h2>Login accepted.</h2><p>You can close this browser window.</p>")
        }
        None => Html("<h4>Missing authorization code.</h4>"),
    }
}
