//! # CLI Module
//!
//! User-facing command implementations. Each command resolves the current
//! session through the session layer before touching the Web API, so a valid
//! token is refreshed transparently and a missing session produces a clear
//! pointer to `toptify login`.
//!
//! - [`login`] - browser-based authorization flow
//! - [`top_artists`] / [`top_tracks`] - ranked tables of top items
//! - [`profile`] - the signed-in user's profile
//! - [`logout`] - clears the persisted session

mod login;
mod logout;
mod profile;
mod top;

pub use login::login;
pub use logout::logout;
pub use profile::profile;
pub use top::top_artists;
pub use top::top_tracks;
