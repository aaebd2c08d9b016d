//! Set Assembler: writes the selection to a new playlist and builds the
//! shareable timeline.

use crate::{
    error::SetError,
    spotify::{ADD_TRACKS_BATCH_SIZE, Catalog},
    types::{CreatePlaylistRequest, SetDetail, Visibility},
};

use super::TrackLookup;

/// Destination playlist settings.
#[derive(Debug, Clone)]
pub struct NewPlaylist<'a> {
    pub owner_id: &'a str,
    pub name: &'a str,
    pub visibility: Visibility,
    pub description: &'a str,
}

/// The created playlist and its timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledSet {
    pub playlist_id: String,
    pub set_details: Vec<SetDetail>,
}

/// Formats a playback position as `minutes:seconds`.
///
/// Minutes are not wrapped into hours: 3600 seconds is `60:00`.
pub fn format_timestamp(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub async fn create_playlist<C>(catalog: &C, playlist: &NewPlaylist<'_>) -> Result<String, SetError>
where
    C: Catalog + ?Sized,
{
    let request = CreatePlaylistRequest {
        name: playlist.name.to_string(),
        description: playlist.description.to_string(),
        public: playlist.visibility.is_public(),
        collaborative: false,
    };

    let created = catalog.create_playlist(playlist.owner_id, &request).await?;
    Ok(created.id)
}

/// Adds `uris` in order, in batches of at most [`ADD_TRACKS_BATCH_SIZE`].
pub async fn insert_in_batches<C>(
    catalog: &C,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), SetError>
where
    C: Catalog + ?Sized,
{
    for batch in uris.chunks(ADD_TRACKS_BATCH_SIZE) {
        catalog.add_tracks(playlist_id, batch).await?;
    }
    Ok(())
}

/// Display rows for `uris`, each stamped with the position at which it starts.
pub async fn timeline<C>(
    lookup: &mut TrackLookup<'_, C>,
    uris: &[String],
) -> Result<Vec<SetDetail>, SetError>
where
    C: Catalog + ?Sized,
{
    let mut details = Vec::with_capacity(uris.len());
    let mut position = 0u64;

    for uri in uris {
        let track = lookup.get(uri).await?;
        details.push(SetDetail {
            artist: track
                .primary_artist()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            name: track.name.clone(),
            timestamp: format_timestamp(position),
            album_cover: track.cover_url().map(str::to_string),
        });
        position += track.duration_secs();
    }

    Ok(details)
}

/// Creates the playlist, fills it, and returns its timeline.
///
/// A failure after the playlist was created leaves that playlist in place.
pub async fn assemble<C>(
    lookup: &mut TrackLookup<'_, C>,
    playlist: &NewPlaylist<'_>,
    uris: &[String],
) -> Result<AssembledSet, SetError>
where
    C: Catalog + ?Sized,
{
    let catalog = lookup.catalog();
    let playlist_id = create_playlist(catalog, playlist).await?;
    insert_in_batches(catalog, &playlist_id, uris).await?;
    let set_details = timeline(lookup, uris).await?;

    Ok(AssembledSet {
        playlist_id,
        set_details,
    })
}
