//! Configuration management for SetSmith.
//!
//! This module loads `.env` files and turns the process environment into a
//! typed [`Config`]. The configuration is built once by the boundary layer
//! (server start-up or a CLI command) and handed to everything else by
//! reference; nothing below the boundary reads environment variables.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory
//! 4. Defaults for the public Spotify endpoints

use std::{env, net::SocketAddr, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5001";
pub const DEFAULT_SCOPE: &str = "user-library-read user-library-modify playlist-modify-private playlist-modify-public user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is loaded first, then the one located in
/// the platform-specific local data directory under `setsmith/.env`. Variables
/// already present in the environment are never overwritten. Missing files are
/// skipped.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/setsmith/.env`
/// - macOS: `~/Library/Application Support/setsmith/.env`
/// - Windows: `%LOCALAPPDATA%/setsmith/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local)?;
    }

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("setsmith/.env");
    path
}

/// Runtime configuration of the service and the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP service binds to (`SERVER_ADDRESS`).
    pub server_addr: SocketAddr,
    /// OAuth client id (`SPOTIFY_API_AUTH_CLIENT_ID`).
    pub client_id: String,
    /// Callback URL registered with Spotify (`SPOTIFY_API_REDIRECT_URI`).
    pub redirect_uri: String,
    /// Space separated scopes (`SPOTIFY_API_AUTH_SCOPE`).
    pub scope: String,
    /// Authorization endpoint (`SPOTIFY_API_AUTH_URL`).
    pub auth_url: String,
    /// Token endpoint (`SPOTIFY_API_TOKEN_URL`).
    pub token_url: String,
    /// Web API base URL (`SPOTIFY_API_URL`).
    pub api_url: String,
    /// Browser destination after a successful login (`FRONTEND_URL`).
    pub frontend_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an unset required variable and
    /// [`ConfigError::Invalid`] for an unparsable server address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let or_default =
            |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let addr = or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "SERVER_ADDRESS",
                reason: e.to_string(),
            })?;

        Ok(Self {
            server_addr,
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: trim_slash(or_default("SPOTIFY_API_URL", DEFAULT_API_URL)),
            frontend_url: or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL),
        })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
