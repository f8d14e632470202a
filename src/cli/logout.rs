use crate::{error, session::SessionManager, success};

pub async fn logout() {
    let session = SessionManager::open();
    match session.logout().await {
        Ok(()) => success!("Logged out. Local session cleared."),
        Err(e) => error!("Failed to clear session: {}", e),
    }
}
