//! Genre Classifier: groups tracks by the genres of their primary artist.

use std::collections::{HashMap, HashSet};

use crate::{
    error::SetError,
    spotify::{ARTIST_BATCH_SIZE, Catalog},
    types::{Artist, Track},
};

/// Track uris grouped by genre label.
///
/// Within a bucket, uris keep the order in which the source playlist was
/// traversed. A track whose artist has several genres appears in each of
/// their buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreIndex {
    buckets: HashMap<String, Vec<String>>,
}

impl GenreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, genre: &str, uri: &str) {
        self.buckets
            .entry(genre.to_string())
            .or_default()
            .push(uri.to_string());
    }

    /// Tracks tagged with `genre`. Labels match exactly, case included.
    pub fn tracks(&self, genre: &str) -> &[String] {
        self.buckets.get(genre).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every genre label, sorted alphabetically.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = self.buckets.keys().cloned().collect();
        genres.sort();
        genres
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of (genre, track) memberships.
    pub fn membership_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Candidate pool for a genre filter.
    ///
    /// Buckets are concatenated in the order the genres were requested; a uri
    /// reached through more than one genre is kept at its first position.
    /// Unknown genres contribute nothing.
    pub fn pool(&self, genres: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        genres
            .iter()
            .flat_map(|genre| self.tracks(genre))
            .filter(|uri| seen.insert(*uri))
            .cloned()
            .collect()
    }
}

/// Result of classifying a playlist.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub index: GenreIndex,
    /// Artists fetched during classification, keyed by id.
    pub artists: HashMap<String, Artist>,
    /// Distinct track uris seen in the playlist.
    pub unique_tracks: HashSet<String>,
}

/// Classifies `tracks` by the genres of their primary artist.
///
/// Each distinct artist id is looked up exactly once, in batches of
/// [`ARTIST_BATCH_SIZE`]. Tracks without a primary artist id, and tracks whose
/// artist the catalog does not return, end up in no bucket.
///
/// # Errors
///
/// A failing batch lookup aborts the classification.
pub async fn classify<C>(catalog: &C, tracks: &[Track]) -> Result<Classification, SetError>
where
    C: Catalog + ?Sized,
{
    let mut classification = Classification::default();
    let mut artist_ids: Vec<String> = Vec::new();
    let mut seen_artists: HashSet<&str> = HashSet::new();

    for track in tracks {
        if !classification.unique_tracks.insert(track.uri.clone()) {
            continue;
        }
        if let Some(artist_id) = track.primary_artist_id() {
            if seen_artists.insert(artist_id) {
                artist_ids.push(artist_id.to_string());
            }
        }
    }

    for batch in artist_ids.chunks(ARTIST_BATCH_SIZE) {
        for artist in catalog.artists(batch).await? {
            classification.artists.insert(artist.id.clone(), artist);
        }
    }

    for track in tracks {
        let Some(artist) = track
            .primary_artist_id()
            .and_then(|id| classification.artists.get(id))
        else {
            continue;
        };

        for genre in &artist.genres {
            classification.index.insert(genre, &track.uri);
        }
    }

    Ok(classification)
}
