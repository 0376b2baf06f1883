//! # API Module
//!
//! HTTP endpoints of the temporary local server that runs while the user
//! authorizes lastsync with Spotify.
//!
//! - [`callback`] receives the redirect from Spotify's authorization server
//!   and exchanges the code for a token using the PKCE verifier held in the
//!   shared state.
//! - [`health`] reports status and version, handy for checking that the
//!   redirect URI points at the right address.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use lastsync::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
