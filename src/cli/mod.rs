//! # CLI Module
//!
//! User-facing commands. Each command loads its configuration, builds the
//! real clients and hands over to the library, printing progress with the
//! crate's output macros.
//!
//! - [`auth`] authorizes lastsync with Spotify once and caches the token, so
//!   scheduled runs never need a browser.
//! - [`sync`] clears the playlist, copies the recent scrobbles into it and
//!   starts playback.
//!
//! ```bash
//! lastsync auth
//! lastsync --playlist 37i9dQZF1DX0XUsuxWHRQd --last-fm-username rj --days 2
//! ```

mod auth;
mod sync;

pub use auth::auth;
pub use sync::{SyncArgs, sync};
