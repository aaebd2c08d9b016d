//! # API Module
//!
//! HTTP handlers of the SetSmith web service.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - starts an OAuth 2.0 PKCE login and redirects to Spotify
//! - [`callback`] - exchanges the authorization code and stores the token
//! - [`check_auth`] - reports whether the caller has a session token
//! - [`sign_out`] - forgets the session token
//!
//! ### Curation
//!
//! - [`create_set`] - builds a set from a playlist (genre filter, duration)
//! - [`playlist_genres`] - lists the genres found in a playlist
//! - [`favorites_playlist`] - builds a playlist from the user's top tracks
//! - [`user_playlists`] - lists the user's playlists to pick a source from
//!
//! ### Monitoring
//!
//! - [`index`] and [`health`]
//!
//! ## Credentials
//!
//! Handlers resolve the caller's access token at the boundary, either from the
//! `setsmith_session` cookie or from an `Authorization: Bearer` header, and
//! hand an explicit catalog client to the curation core. Without a usable
//! credential the response is a redirect to `/login`.
//!
//! ## Errors
//!
//! [`crate::error::SetError`] implements `IntoResponse`: invalid input is a
//! 400 with a short message, catalog failures a 502 without internal details.

mod auth;
mod error;
mod health;
mod playlists;
mod session;
mod sets;

pub use auth::{begin_login, callback, check_auth, login, sign_out};
pub use health::{health, index};
pub use playlists::user_playlists;
pub use session::{SESSION_COOKIE, bearer_token, session_id};
pub use sets::{create_set, favorites_playlist, playlist_genres};
