//! Configuration management for the Top Spotify CLI.
//!
//! Values are resolved from environment variables, optionally seeded from a
//! `.env` file in the platform-specific local data directory
//! (`toptify/.env`). Environment variables always win over the file.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `toptify/.env` under the platform data directory:
/// - Linux: `~/.local/share/toptify/.env`
/// - macOS: `~/Library/Application Support/toptify/.env`
/// - Windows: `%LOCALAPPDATA%/toptify/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("toptify/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the base URL of the token backend that performs the code exchange
/// (`POST /getAccess`) and the refresh (`POST /refresh`).
///
/// # Panics
///
/// Panics if the `BACKEND_API_URL` environment variable is not set.
pub fn backend_api_url() -> String {
    env::var("BACKEND_API_URL").expect("BACKEND_API_URL must be set")
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth authorization URL where the user grants access,
/// e.g. `https://accounts.spotify.com/authorize`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_AUTH_URL` environment variable is not set.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL").expect("SPOTIFY_AUTH_URL must be set")
}

/// Returns the Spotify API client ID of this application registration.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI. Must match the URI registered in the
/// Spotify application settings and point at the local callback server.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// Returns the OAuth scope requested during authorization. Reading top
/// artists and tracks requires `user-top-read`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_SCOPE").expect("SPOTIFY_SCOPE must be set")
}
