use crate::{
    error::CatalogError,
    types::{TimeRange, TopTracksResponse, Track},
    utils,
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves a single track by uri (`spotify:track:<id>`) or bare id.
    pub async fn get_track(&self, uri: &str) -> Result<Track, CatalogError> {
        let path = format!("/tracks/{}", utils::track_id_from_uri(uri));
        let request = self.get(&path);
        self.send_json(request, &path).await
    }

    /// Retrieves the current user's top tracks for a time range.
    ///
    /// `limit` is passed through unchanged; Spotify accepts 1 to 50.
    pub async fn get_top_tracks(
        &self,
        limit: u32,
        range: TimeRange,
    ) -> Result<Vec<Track>, CatalogError> {
        let request = self.get("/me/top/tracks").query(&[
            ("limit", limit.to_string()),
            ("time_range", range.as_str().to_string()),
        ]);
        let response: TopTracksResponse = self.send_json(request, "/me/top/tracks").await?;
        Ok(response.items)
    }
}
