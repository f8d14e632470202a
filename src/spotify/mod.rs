//! # Spotify Integration Module
//!
//! Thin client over the Spotify Web API endpoints this application reads.
//! All calls are bearer-token authenticated; the token is produced by the
//! session layer, which transparently refreshes it when expired.
//!
//! ## Covered endpoints
//!
//! - `GET /me/top/artists` and `GET /me/top/tracks` ([`top`]) with `limit`,
//!   `offset` and `time_range` parameters
//! - `GET /me` ([`profile`]) for the signed-in user's profile
//!
//! Transient 502 responses are retried with a delay; other failures are
//! propagated as [`reqwest::Error`] for the caller to report.

pub mod profile;
pub mod top;
