use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config, error,
    server::start_api_server,
    session::SessionManager,
    success,
    types::AuthRequest,
    utils, warning,
};

/// Runs the interactive login flow.
///
/// Starts the local callback server, sends the user's browser to the
/// authorization page and waits for the redirect to deliver a one-time
/// authorization code. The code is then handed to the session manager,
/// which exchanges it for a token pair and persists the session.
///
/// The `state` nonce generated here is carried through the redirect and
/// checked by the callback handler, so a stray or forged redirect cannot
/// complete the login.
pub async fn login(shared_state: Arc<Mutex<Option<AuthRequest>>>) {
    let state_nonce = utils::generate_state_nonce();

    // start callback server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        spotify_auth_url = &config::spotify_auth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        scope = &config::spotify_scope(),
        state = state_nonce
    );

    // Register the attempt before the redirect can come back
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthRequest {
            state: state_nonce,
            code: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for the redirect to deliver the code
    let code = wait_for_code(shared_state).await;

    match code {
        Some(code) => {
            let session = SessionManager::open();
            match session.resolve_token(Some(&code)).await {
                Some(_) => success!("Login successful!"),
                None => error!("Login failed: no access token could be obtained."),
            }
        }
        None => {
            error!("Login failed or timed out.");
        }
    }
}

/// Polls the shared login state for a delivered authorization code, giving
/// up after 60 seconds.
async fn wait_for_code(shared_state: Arc<Mutex<Option<AuthRequest>>>) -> Option<String> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(auth_request) = lock.as_ref() {
            if let Some(code) = &auth_request.code {
                return Some(code.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
