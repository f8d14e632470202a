use tokio::sync::Mutex;

use crate::{
    Res, info,
    session::{
        backend::TokenBackend,
        store::{Credential, CredentialStore, FileCredentialStore, StoreError},
    },
    utils, warning,
};

/// Which network operation, if any, the session manager currently has in
/// flight. At most one exchange or refresh runs at a time; triggers arriving
/// while the phase is not `Idle` observe the running operation instead of
/// starting another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Exchanging,
    Refreshing,
}

/// Owns the access-token lifecycle: obtaining a token pair from an
/// authorization code, detecting expiry, refreshing, and handing the current
/// token to callers.
///
/// The manager is the only writer of the injected [`CredentialStore`]. All
/// decisions are made against the persisted state, so a fresh manager on a
/// later run continues the same session.
pub struct SessionManager<S: CredentialStore> {
    store: S,
    backend: TokenBackend,
    phase: Mutex<SessionPhase>,
}

impl SessionManager<FileCredentialStore> {
    /// Manager over the default on-disk store and the configured backend.
    pub fn open() -> Self {
        Self::new(FileCredentialStore::default_location(), TokenBackend::from_config())
    }
}

impl<S: CredentialStore> SessionManager<S> {
    pub fn new(store: S, backend: TokenBackend) -> Self {
        Self {
            store,
            backend,
            phase: Mutex::new(SessionPhase::Idle),
        }
    }

    /// Produces the current access token, performing any necessary exchange
    /// as a side effect.
    ///
    /// Decision order:
    /// 1. An authorization code is given and no access token is persisted:
    ///    exchange the code for a token pair and persist it.
    /// 2. A persisted expiry time exists, it is in the past and a refresh
    ///    token is stored: refresh the access token. The refresh token
    ///    itself is left untouched.
    /// 3. Otherwise no network call is made.
    ///
    /// A failed exchange or refresh is logged and leaves the persisted state
    /// unchanged; the next resolution simply takes the same branch again.
    /// The returned value is whatever access token is persisted once the
    /// decision has run, or the prior token when another resolution already
    /// has an operation in flight.
    ///
    /// Authorization codes are single-use against the backend. Callers must
    /// obtain a fresh code for every login attempt and must not feed the
    /// same code into more than one resolution.
    pub async fn resolve_token(&self, auth_code: Option<&str>) -> Option<String> {
        let credential = match self.store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                warning!("Failed to read session state: {}", e);
                return None;
            }
        };

        if !wants_exchange(auth_code, &credential) && !wants_refresh(&credential) {
            return credential.access_token;
        }

        let Ok(mut phase) = self.phase.try_lock() else {
            // An exchange or refresh is already running; report the token as
            // currently persisted and let that operation land its result.
            return credential.access_token;
        };

        // Re-read under the guard. A concurrent trigger may have completed
        // the same operation between our first read and acquiring the phase.
        let credential = match self.store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                warning!("Failed to read session state: {}", e);
                return None;
            }
        };

        match auth_code {
            Some(code) if credential.access_token.is_none() => {
                info!("No access token. Exchanging authorization code...");
                *phase = SessionPhase::Exchanging;
                let outcome = self.exchange(code).await;
                *phase = SessionPhase::Idle;
                if let Err(e) = outcome {
                    warning!("Token exchange failed: {}", e);
                }
            }
            _ => {
                if wants_refresh(&credential) {
                    info!("Access token expired. Refreshing...");
                    *phase = SessionPhase::Refreshing;
                    let outcome = self.refresh(&credential).await;
                    *phase = SessionPhase::Idle;
                    if let Err(e) = outcome {
                        warning!("Token refresh failed: {}", e);
                    }
                }
            }
        }

        match self.store.load().await {
            Ok(credential) => credential.access_token,
            Err(e) => {
                warning!("Failed to read session state: {}", e);
                None
            }
        }
    }

    /// Clears the persisted session. Both token cookies and the expiry
    /// entry are removed together so no stale expiry can linger and trip a
    /// refresh against a token that no longer exists.
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }

    async fn exchange(&self, auth_code: &str) -> Res<()> {
        let grant = self.backend.exchange_code(auth_code).await?;
        let credential = Credential {
            access_token: Some(grant.access_token),
            refresh_token: Some(grant.refresh_token),
            expires_at: Some(utils::compute_expiry(grant.expires_in)),
        };
        self.store.save(&credential).await?;
        Ok(())
    }

    async fn refresh(&self, credential: &Credential) -> Res<()> {
        let Some(refresh_token) = credential.refresh_token.as_deref() else {
            return Ok(());
        };

        let grant = self.backend.refresh(refresh_token).await?;
        let mut updated = credential.clone();
        updated.access_token = Some(grant.access_token);
        updated.expires_at = Some(utils::compute_expiry(grant.expires_in));
        self.store.save(&updated).await?;
        Ok(())
    }
}

fn wants_exchange(auth_code: Option<&str>, credential: &Credential) -> bool {
    auth_code.is_some() && credential.access_token.is_none()
}

fn wants_refresh(credential: &Credential) -> bool {
    credential.is_expired() && credential.refresh_token.is_some()
}
