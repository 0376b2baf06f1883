//! lastsync library
//!
//! Copies a Last.fm user's recent listening history into a Spotify playlist
//! and optionally starts playing it. A run clears the playlist, fetches the
//! scrobbles of a time window, searches each one in the Spotify catalog,
//! appends the matches in batches and starts playback.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from the environment and `.env` files
//! - `lastfm` - Last.fm web service client
//! - `management` - Cached Spotify token handling
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - The sync run and the capability traits it depends on
//! - `types` - Data structures and API payloads
//! - `utils` - Text cleanup, time window math and PKCE helpers
//!
//! # Example
//!
//! ```
//! use lastsync::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> lastsync::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod lastfm;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Errors are boxed trait objects with Send + Sync bounds so API, parse and
/// configuration failures can all bubble up to `main` through `?`.
///
/// # Example
///
/// ```
/// use lastsync::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Found {} items", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a completion line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints the message to stderr with a red `!` and exits with status 1.
///
/// Evaluates to `!`, so it can end a `match` arm or a `let ... else`.
///
/// ```
/// let credentials = match LastFmCredentials::from_env() {
///     Ok(c) => c,
///     Err(e) => error!("{}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem to stderr with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
