//! Build script for SetSmith.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so that a freshly installed binary has a ready-to-edit
//! example next to the location where it looks for its `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// # File Locations
///
/// The template is copied to the platform-specific local data directory:
/// - Linux: `~/.local/share/setsmith/.env.example`
/// - macOS: `~/Library/Application Support/setsmith/.env.example`
/// - Windows: `%LOCALAPPDATA%/setsmith/.env.example`
///
/// # Error Handling
///
/// - **Missing Template**: emits a cargo warning and continues the build
/// - **Directory Creation / Write Failures**: returned as build errors
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("setsmith");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
