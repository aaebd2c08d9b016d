use crate::{
    error::CatalogError,
    types::{Artist, SeveralArtistsResponse},
};

use super::{ARTIST_BATCH_SIZE, SpotifyClient};

impl SpotifyClient {
    /// Retrieves several artists in a single request.
    ///
    /// Spotify answers unknown ids with `null` entries; those are dropped, so
    /// the result may be shorter than `ids`.
    ///
    /// # Arguments
    ///
    /// * `ids` - Bare artist ids, at most [`ARTIST_BATCH_SIZE`]
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] when more ids than the batch ceiling
    /// are passed, otherwise whatever the request itself fails with.
    pub async fn get_several_artists(&self, ids: &[String]) -> Result<Vec<Artist>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > ARTIST_BATCH_SIZE {
            return Err(CatalogError::Decode(format!(
                "{} artist ids exceed the batch limit of {}",
                ids.len(),
                ARTIST_BATCH_SIZE
            )));
        }

        let request = self.get("/artists").query(&[("ids", ids.join(","))]);
        let response: SeveralArtistsResponse = self.send_json(request, "/artists").await?;

        Ok(response.artists.into_iter().flatten().collect())
    }
}
