//! # CLI Module
//!
//! Command-line front-end for SetSmith. Every command logs in through the
//! browser (see [`login`]), then runs the same curation pipelines as the web
//! service and prints the result as a table.
//!
//! ## Commands
//!
//! - [`genres`] - lists the genres of a playlist with their track counts
//! - [`create_set`] - builds a set from a playlist
//! - [`favorites`] - builds a playlist from the user's top tracks
//!
//! ## Usage
//!
//! ```bash
//! setsmith genres 37i9dQZF1DXcBWIGoYBM5M
//! setsmith create-set --playlist 37i9dQZF1DXcBWIGoYBM5M --name "Friday" \
//!     --genres "indie rock,shoegaze" --duration 60
//! setsmith favorites --name "Top 50" --limit 50 --range short_term --public
//! ```
//!
//! Catalog failures end the command with an error message and a non-zero
//! exit code.

mod auth;
mod favorites;
mod genres;
mod set;

pub use auth::login;
pub use favorites::favorites;
pub use genres::genres;
pub use set::{SetOptions, create_set};

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
