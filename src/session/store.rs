use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookie holding the short-lived bearer token for Web API calls.
pub const ACCESS_TOKEN_COOKIE: &str = "spotifyAccessToken";
/// Cookie holding the long-lived token used to renew the access token.
pub const REFRESH_TOKEN_COOKIE: &str = "spotifyRefreshToken";
/// Key-value entry holding the absolute expiry time as an ISO-8601 string.
pub const EXPIRY_STORAGE_KEY: &str = "expiresIn";

#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "io error: {}", e),
            StoreError::SerdeError(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// The persisted session state, assembled from both storage documents.
///
/// All fields start absent on first use. `access_token` being present does
/// not imply the token is still valid; expiry is tracked separately in
/// `expires_at` and checked at resolution time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// True when an expiry time is recorded and the current time is past it.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() > at)
    }
}

/// Durable persistence for the [`Credential`].
///
/// The session manager is the only writer; any number of readers may load.
/// Implementations must make `save` and `clear` whole-credential operations
/// so partial updates are never observable.
pub trait CredentialStore {
    async fn load(&self) -> Result<Credential, StoreError>;
    async fn save(&self, credential: &Credential) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,
    pub path: String,
}

impl Cookie {
    fn new(value: &str) -> Self {
        Cookie {
            value: value.to_string(),
            path: "/".to_string(),
        }
    }
}

/// File-backed [`CredentialStore`] mirroring the browser storage the session
/// originally lived in: `cookies.json` holds the two token cookies (path
/// scoped to `/`) and `storage.json` holds the expiry entry.
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the platform data directory (`toptify/session`).
    pub fn default_location() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("toptify/session");
        Self { root }
    }

    fn cookies_path(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    fn storage_path(&self) -> PathBuf {
        self.root.join("storage.json")
    }

    async fn read_cookies(&self) -> Result<BTreeMap<String, Cookie>, StoreError> {
        match async_fs::read_to_string(self.cookies_path()).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    async fn read_storage(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match async_fs::read_to_string(self.storage_path()).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credential, StoreError> {
        let cookies = self.read_cookies().await?;
        let storage = self.read_storage().await?;

        // An unparseable expiry entry is treated as absent rather than
        // failing the whole load; the entry is rewritten on the next grant.
        let expires_at = storage.get(EXPIRY_STORAGE_KEY).and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });

        Ok(Credential {
            access_token: cookies.get(ACCESS_TOKEN_COOKIE).map(|c| c.value.clone()),
            refresh_token: cookies.get(REFRESH_TOKEN_COOKIE).map(|c| c.value.clone()),
            expires_at,
        })
    }

    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;

        let mut cookies = BTreeMap::new();
        if let Some(access) = &credential.access_token {
            cookies.insert(ACCESS_TOKEN_COOKIE.to_string(), Cookie::new(access));
        }
        if let Some(refresh) = &credential.refresh_token {
            cookies.insert(REFRESH_TOKEN_COOKIE.to_string(), Cookie::new(refresh));
        }
        let json = serde_json::to_string_pretty(&cookies)?;
        async_fs::write(self.cookies_path(), json).await?;

        let mut storage = BTreeMap::new();
        if let Some(expires_at) = &credential.expires_at {
            storage.insert(EXPIRY_STORAGE_KEY.to_string(), expires_at.to_rfc3339());
        }
        let json = serde_json::to_string_pretty(&storage)?;
        async_fs::write(self.storage_path(), json).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        for path in [self.cookies_path(), self.storage_path()] {
            match async_fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::IoError(e)),
            }
        }
        Ok(())
    }
}
