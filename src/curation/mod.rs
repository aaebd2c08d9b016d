//! # Curation Module
//!
//! The playlist curation engine. A request flows through four stages:
//!
//! ```text
//! ingest::fetch_all  →  genres::classify  →  select::select  →  assemble::assemble
//!   (playlist pages)     (genre buckets)      (fit duration)      (new playlist + timeline)
//! ```
//!
//! Every stage takes the catalog explicitly and owns only request-scoped
//! state. The [`TrackLookup`] cache lives for one request and guarantees that
//! a track is fetched from the catalog at most once per request.
//!
//! The three public pipelines, [`create_set`], [`playlist_genres`] and
//! [`favorites_playlist`], are what the HTTP handlers and the CLI call.

pub mod assemble;
pub mod genres;
pub mod ingest;
pub mod select;

use std::collections::HashMap;

pub use assemble::{AssembledSet, NewPlaylist, format_timestamp};
pub use genres::{Classification, GenreIndex, classify};
pub use ingest::fetch_all;
pub use select::{KeepOrder, SeededShuffle, Selection, Shuffler, select};

use crate::{
    error::SetError,
    info,
    spotify::Catalog,
    types::{CreateSetPayload, FavoritesPayload, Numeric, TimeRange, Track, Visibility},
    utils,
};

pub const FAVORITES_DESCRIPTION: &str = "Favorites Playlist";
pub const DEFAULT_FAVORITES_LIMIT: u32 = 20;
pub const MAX_FAVORITES_LIMIT: u32 = 50;

/// Request-scoped track cache in front of the catalog.
pub struct TrackLookup<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    cache: HashMap<String, Track>,
}

impl<'a, C: Catalog + ?Sized> TrackLookup<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
        }
    }

    /// Starts with tracks that are already known, e.g. from ingestion.
    pub fn with_tracks(catalog: &'a C, tracks: impl IntoIterator<Item = Track>) -> Self {
        let cache = tracks.into_iter().map(|t| (t.uri.clone(), t)).collect();
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &'a C {
        self.catalog
    }

    /// Returns the track for `uri`, fetching it on first use.
    pub async fn get(&mut self, uri: &str) -> Result<&Track, SetError> {
        if !self.cache.contains_key(uri) {
            let track = self.catalog.track(uri).await?;
            self.cache.insert(uri.to_string(), track);
        }
        Ok(&self.cache[uri])
    }
}

/// Validated create-set request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRequest {
    pub playlist_id: String,
    pub name: String,
    pub visibility: Visibility,
    /// Empty means no genre filter.
    pub genres: Vec<String>,
    pub duration_minutes: Option<u32>,
}

impl TryFrom<CreateSetPayload> for SetRequest {
    type Error = SetError;

    fn try_from(payload: CreateSetPayload) -> Result<Self, Self::Error> {
        let playlist_id = required_text("selected_playlist_id", payload.selected_playlist_id)?;
        let name = required_text("playlist_name", payload.playlist_name)?;

        let duration_minutes = match optional_number("duration", payload.duration.as_ref())? {
            None | Some(0) => None,
            Some(m) if m < 0 => {
                return Err(SetError::InvalidRequest(
                    "duration must not be negative".to_string(),
                ));
            }
            Some(m) => Some(u32::try_from(m).map_err(|_| {
                SetError::InvalidRequest("duration is too large".to_string())
            })?),
        };

        Ok(SetRequest {
            playlist_id,
            name,
            visibility: visibility(payload.playlist_visibility.as_ref()),
            genres: utils::parse_genres(payload.genres.as_deref()),
            duration_minutes,
        })
    }
}

/// Validated favorites request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesRequest {
    pub limit: u32,
    pub range: TimeRange,
    pub name: String,
    pub visibility: Visibility,
}

impl TryFrom<FavoritesPayload> for FavoritesRequest {
    type Error = SetError;

    fn try_from(payload: FavoritesPayload) -> Result<Self, Self::Error> {
        let name = required_text("playlist_name", payload.playlist_name)?;

        let limit = match optional_number("limit", payload.limit.as_ref())? {
            None => DEFAULT_FAVORITES_LIMIT,
            Some(l) if (1..=i64::from(MAX_FAVORITES_LIMIT)).contains(&l) => l as u32,
            Some(_) => {
                return Err(SetError::InvalidRequest(format!(
                    "limit must be between 1 and {MAX_FAVORITES_LIMIT}"
                )));
            }
        };

        let range = match payload.range.as_deref() {
            None | Some("") => TimeRange::default(),
            Some(r) => r.parse::<TimeRange>().map_err(SetError::InvalidRequest)?,
        };

        Ok(FavoritesRequest {
            limit,
            range,
            name,
            visibility: visibility(payload.playlist_visibility.as_ref()),
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, SetError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SetError::InvalidRequest(format!("{field} is required")))
}

fn optional_number(field: &str, value: Option<&Numeric>) -> Result<Option<i64>, SetError> {
    match value {
        None => Ok(None),
        Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| SetError::InvalidRequest(format!("{field} must be a whole number"))),
    }
}

/// `1` means public; anything else, including a missing value, is private.
fn visibility(value: Option<&Numeric>) -> Visibility {
    match value.and_then(Numeric::as_i64) {
        Some(1) => Visibility::Public,
        _ => Visibility::Private,
    }
}

/// Builds a set from a source playlist.
///
/// Ingests the playlist, narrows it to the requested genres (if any), fits it
/// to the requested duration (if any), then writes the result to a new
/// playlist owned by the current user.
pub async fn create_set<C, S>(
    catalog: &C,
    request: &SetRequest,
    shuffler: &mut S,
) -> Result<AssembledSet, SetError>
where
    C: Catalog + ?Sized,
    S: Shuffler + ?Sized,
{
    let tracks = fetch_all(catalog, &request.playlist_id).await?;
    info!(
        "Fetched {} tracks from playlist {}",
        tracks.len(),
        request.playlist_id
    );

    let pool: Vec<String> = if request.genres.is_empty() {
        tracks.iter().map(|t| t.uri.clone()).collect()
    } else {
        let classification = classify(catalog, &tracks).await?;
        classification.index.pool(&request.genres)
    };

    let mut lookup = TrackLookup::with_tracks(catalog, tracks);
    let selected = select(&mut lookup, pool, request.duration_minutes, shuffler).await?;
    info!("Selected {} tracks", selected.len());

    let owner = catalog.current_user().await?;
    let playlist = NewPlaylist {
        owner_id: &owner.id,
        name: &request.name,
        visibility: request.visibility,
        description: "",
    };

    assemble::assemble(&mut lookup, &playlist, &selected).await
}

/// Alphabetically sorted genres present in a playlist.
pub async fn playlist_genres<C>(catalog: &C, playlist_id: &str) -> Result<Vec<String>, SetError>
where
    C: Catalog + ?Sized,
{
    Ok(playlist_index(catalog, playlist_id).await?.genres())
}

/// Genre index of a playlist.
pub async fn playlist_index<C>(catalog: &C, playlist_id: &str) -> Result<GenreIndex, SetError>
where
    C: Catalog + ?Sized,
{
    let tracks = fetch_all(catalog, playlist_id).await?;
    Ok(classify(catalog, &tracks).await?.index)
}

/// Creates a playlist from the current user's top tracks.
///
/// Returns the id of the new playlist.
pub async fn favorites_playlist<C>(
    catalog: &C,
    request: &FavoritesRequest,
) -> Result<String, SetError>
where
    C: Catalog + ?Sized,
{
    let top_tracks = catalog.top_tracks(request.limit, request.range).await?;
    let uris: Vec<String> = top_tracks.into_iter().map(|t| t.uri).collect();

    let owner = catalog.current_user().await?;
    let playlist = NewPlaylist {
        owner_id: &owner.id,
        name: &request.name,
        visibility: request.visibility,
        description: FAVORITES_DESCRIPTION,
    };

    let playlist_id = assemble::create_playlist(catalog, &playlist).await?;
    assemble::insert_in_batches(catalog, &playlist_id, &uris).await?;
    Ok(playlist_id)
}
