#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use setsmith::{
    error::CatalogError,
    spotify::Catalog,
    types::{
        Artist, CreatePlaylistRequest, CreatePlaylistResponse, Image, PlaylistItem,
        PlaylistSummary, TimeRange, Track, TrackAlbum, TrackArtist, User,
    },
};

/// Every call the fake catalog received, in order per kind.
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub totals: Vec<String>,
    pub page_offsets: Vec<u32>,
    pub artist_batches: Vec<Vec<String>>,
    pub track_lookups: Vec<String>,
    pub created: Vec<CreatePlaylistRequest>,
    pub added: Vec<(String, Vec<String>)>,
    pub top_requests: Vec<(u32, TimeRange)>,
}

/// In-memory catalog that records what it was asked for.
#[derive(Default)]
pub struct FakeCatalog {
    pub playlists: HashMap<String, Vec<Option<Track>>>,
    pub artists: HashMap<String, Artist>,
    pub tracks: HashMap<String, Track>,
    pub top: Vec<Track>,
    pub playlist_summaries: Vec<PlaylistSummary>,
    pub fail_artists: bool,
    pub fail_add_tracks: bool,
    calls: Mutex<Calls>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, id: &str, tracks: Vec<Track>) -> Self {
        for track in &tracks {
            self.tracks.insert(track.uri.clone(), track.clone());
        }
        self.playlists
            .insert(id.to_string(), tracks.into_iter().map(Some).collect());
        self
    }

    pub fn with_items(mut self, id: &str, items: Vec<Option<Track>>) -> Self {
        for track in items.iter().flatten() {
            self.tracks.insert(track.uri.clone(), track.clone());
        }
        self.playlists.insert(id.to_string(), items);
        self
    }

    pub fn with_artist(mut self, id: &str, genres: &[&str]) -> Self {
        self.artists.insert(id.to_string(), artist(id, genres));
        self
    }

    pub fn calls(&self) -> MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }

    fn failure(endpoint: &str) -> CatalogError {
        CatalogError::Status {
            status: 500,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn playlist_total(&self, playlist_id: &str) -> Result<u32, CatalogError> {
        self.calls().totals.push(playlist_id.to_string());
        self.playlists
            .get(playlist_id)
            .map(|items| items.len() as u32)
            .ok_or(CatalogError::Status {
                status: 404,
                endpoint: format!("/playlists/{playlist_id}"),
            })
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistItem>, CatalogError> {
        self.calls().page_offsets.push(offset);
        let items = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| Self::failure("/playlists/tracks"))?;

        Ok(items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|track| PlaylistItem {
                track: track.clone(),
            })
            .collect())
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError> {
        self.calls().artist_batches.push(ids.to_vec());
        if self.fail_artists {
            return Err(Self::failure("/artists"));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.artists.get(id).cloned())
            .collect())
    }

    async fn track(&self, uri: &str) -> Result<Track, CatalogError> {
        self.calls().track_lookups.push(uri.to_string());
        self.tracks
            .get(uri)
            .cloned()
            .ok_or_else(|| Self::failure("/tracks"))
    }

    async fn current_user(&self) -> Result<User, CatalogError> {
        Ok(User {
            id: "owner".to_string(),
            display_name: Some("Owner".to_string()),
        })
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        let mut calls = self.calls();
        calls.created.push(request.clone());
        Ok(CreatePlaylistResponse {
            id: format!("new-{}", calls.created.len()),
            name: request.name.clone(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        if self.fail_add_tracks {
            return Err(Self::failure("/playlists/tracks"));
        }
        self.calls()
            .added
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }

    async fn top_tracks(&self, limit: u32, range: TimeRange) -> Result<Vec<Track>, CatalogError> {
        self.calls().top_requests.push((limit, range));
        Ok(self.top.iter().take(limit as usize).cloned().collect())
    }

    async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        Ok(self.playlist_summaries.clone())
    }
}

pub fn track(id: &str, artist_id: &str, secs: u64) -> Track {
    Track {
        uri: format!("spotify:track:{id}"),
        name: format!("Song {id}"),
        duration_ms: secs * 1000 + 400,
        artists: vec![TrackArtist {
            id: Some(artist_id.to_string()),
            name: format!("Artist {artist_id}"),
        }],
        album: TrackAlbum {
            images: vec![Image {
                url: format!("https://img.example.com/{id}.jpg"),
            }],
        },
    }
}

pub fn artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {id}"),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

/// `n` tracks `t0..t{n-1}` by artists `a0..a{n-1}`, each `secs` long.
pub fn numbered_tracks(n: usize, secs: u64) -> Vec<Track> {
    (0..n)
        .map(|i| track(&format!("t{i}"), &format!("a{i}"), secs))
        .collect()
}
