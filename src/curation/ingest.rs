//! Playlist Ingestor: flattens a paginated playlist into ordered tracks.

use crate::{
    error::SetError,
    spotify::{Catalog, PLAYLIST_PAGE_SIZE},
    types::Track,
    warning,
};

/// Fetches every track of a playlist, in playlist order.
///
/// One call determines the total, then pages of [`PLAYLIST_PAGE_SIZE`] are
/// requested at increasing offsets. Entries without a track object (removed
/// or unavailable items) cannot be referenced later and are skipped.
///
/// # Errors
///
/// The first failing catalog call aborts ingestion. Nothing is retried.
pub async fn fetch_all<C>(catalog: &C, playlist_id: &str) -> Result<Vec<Track>, SetError>
where
    C: Catalog + ?Sized,
{
    let total = catalog.playlist_total(playlist_id).await?;
    let mut tracks = Vec::with_capacity(total as usize);
    let mut skipped = 0usize;

    for offset in (0..total).step_by(PLAYLIST_PAGE_SIZE as usize) {
        let page = catalog
            .playlist_items(playlist_id, PLAYLIST_PAGE_SIZE, offset)
            .await?;

        for item in page {
            match item.track {
                Some(track) => tracks.push(track),
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        warning!(
            "Skipped {} unavailable items in playlist {}",
            skipped,
            playlist_id
        );
    }

    Ok(tracks)
}
