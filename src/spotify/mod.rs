//! # Spotify Integration Module
//!
//! This module is the Catalog Client of SetSmith: every track, artist and
//! playlist lookup and every playlist mutation goes through it. It also holds
//! the OAuth 2.0 PKCE helpers used by the login flow.
//!
//! ## Architecture
//!
//! ```text
//! Curation pipelines (ingest, classify, select, assemble)
//!          ↓
//! Catalog trait
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The curation core only knows the [`Catalog`] trait, so tests drive it with
//! an in-memory catalog and the service drives it with [`SpotifyClient`].
//!
//! ## Credentials
//!
//! A [`SpotifyClient`] is built per request around an explicit
//! [`AccessToken`]. It never looks at sessions or global state.
//!
//! ## Error Handling
//!
//! Every call is attempted exactly once. HTTP 401 maps to
//! [`CatalogError::Unauthorized`], other non-success statuses to
//! [`CatalogError::Status`], network failures to [`CatalogError::Transport`]
//! and malformed bodies to [`CatalogError::Decode`]. Rate limiting (429) is
//! reported like any other failed status; callers that want back-off wrap the
//! client themselves.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}` - total track count of a playlist
//! - `GET /playlists/{id}/tracks` - playlist items, 100 per page
//! - `GET /artists?ids=` - up to 50 artists per request
//! - `GET /tracks/{id}` - single track
//! - `GET /me`, `GET /me/playlists`, `GET /me/top/tracks`
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - add up to 100 tracks

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;
pub mod user;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::CatalogError,
    types::{
        AccessToken, Artist, CreatePlaylistRequest, CreatePlaylistResponse, PlaylistItem,
        PlaylistSummary, TimeRange, Track, User,
    },
};

/// Page size used when paginating playlist items.
pub const PLAYLIST_PAGE_SIZE: u32 = 100;
/// Maximum number of artist ids per batch lookup.
pub const ARTIST_BATCH_SIZE: usize = 50;
/// Maximum number of uris per add-items request.
pub const ADD_TRACKS_BATCH_SIZE: usize = 100;

/// Track, artist and playlist operations the curation core depends on.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Number of items in a playlist.
    async fn playlist_total(&self, playlist_id: &str) -> Result<u32, CatalogError>;

    /// One page of playlist items starting at `offset`.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistItem>, CatalogError>;

    /// Batch artist lookup. Unknown ids are left out of the result.
    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError>;

    async fn track(&self, uri: &str) -> Result<Track, CatalogError>;

    async fn current_user(&self) -> Result<User, CatalogError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError>;

    /// Appends `uris` to a playlist. At most [`ADD_TRACKS_BATCH_SIZE`] per call.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError>;

    async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError>;
}

/// reqwest backed [`Catalog`] bound to one access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: AccessToken,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, token: AccessToken) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(self.token.as_str())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(self.token.as_str())
    }

    /// Sends a request once and decodes a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, CatalogError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Decode(format!("{endpoint}: {e}")))
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn playlist_total(&self, playlist_id: &str) -> Result<u32, CatalogError> {
        self.get_playlist_total(playlist_id).await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistItem>, CatalogError> {
        self.get_playlist_items(playlist_id, limit, offset).await
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError> {
        self.get_several_artists(ids).await
    }

    async fn track(&self, uri: &str) -> Result<Track, CatalogError> {
        self.get_track(uri).await
    }

    async fn current_user(&self) -> Result<User, CatalogError> {
        self.get_current_user().await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        self.post_playlist(user_id, request).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.post_playlist_tracks(playlist_id, uris).await
    }

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError> {
        self.get_top_tracks(limit, range).await
    }

    async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        self.get_user_playlists().await
    }
}
