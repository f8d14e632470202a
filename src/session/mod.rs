mod backend;
mod manager;
mod store;

pub use backend::AccessGrant;
pub use backend::RefreshGrant;
pub use backend::TokenBackend;
pub use manager::SessionManager;
pub use manager::SessionPhase;
pub use store::ACCESS_TOKEN_COOKIE;
pub use store::Credential;
pub use store::CredentialStore;
pub use store::EXPIRY_STORAGE_KEY;
pub use store::FileCredentialStore;
pub use store::REFRESH_TOKEN_COOKIE;
pub use store::StoreError;
