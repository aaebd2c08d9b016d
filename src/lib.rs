//! SetSmith Library
//!
//! This library builds curated Spotify playlists ("sets") out of an existing
//! playlist or a user's top tracks. A source playlist is paginated, its tracks
//! are grouped by the genres of their primary artist, and a randomized,
//! duration-bounded selection is written back to Spotify as a new playlist
//! together with a timestamped track list.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web service
//! - `cli` - Command-line front-end running the same pipelines
//! - `config` - Configuration loading from `.env` files and the environment
//! - `curation` - Ingestion, genre classification, selection and assembly
//! - `error` - Error taxonomy shared by every layer
//! - `management` - In-memory session and token management
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Web API client and OAuth helpers
//! - `types` - Catalog records, payloads and response bodies
//! - `utils` - PKCE helpers and small parsing utilities
//!
//! # Example
//!
//! ```
//! use setsmith::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> setsmith::Res<()> {
//!     config::load_env().await?;
//!     let cfg = config::Config::from_env()?;
//!     server::start_api_server(server::AppState::new(cfg)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod curation;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error so that configuration, I/O and curation
/// failures can be propagated from the binary's top level with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Set {} created with {} tracks", playlist_id, count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for unrecoverable failures at the top level of the binary.
/// Request handlers never call it.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Catalog call failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
