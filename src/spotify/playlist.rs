use crate::{
    error::CatalogError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, PlaylistItem, PlaylistItemsResponse, PlaylistTotalResponse,
    },
};

use super::{ADD_TRACKS_BATCH_SIZE, SpotifyClient};

impl SpotifyClient {
    /// Retrieves only the number of items in a playlist.
    ///
    /// Uses the `fields` filter so that no track data is transferred.
    pub async fn get_playlist_total(&self, playlist_id: &str) -> Result<u32, CatalogError> {
        let path = format!("/playlists/{playlist_id}");
        let request = self.get(&path).query(&[("fields", "tracks.total")]);
        let response: PlaylistTotalResponse = self.send_json(request, &path).await?;
        Ok(response.tracks.total)
    }

    /// Retrieves one page of playlist items.
    pub async fn get_playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistItem>, CatalogError> {
        let path = format!("/playlists/{playlist_id}/tracks");
        let request = self.get(&path).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("additional_types", "track".to_string()),
        ]);
        let response: PlaylistItemsResponse = self.send_json(request, &path).await?;
        Ok(response.items)
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn post_playlist(
        &self,
        user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        let path = format!("/users/{user_id}/playlists");
        let request = self.post(&path).json(body);
        self.send_json(request, &path).await
    }

    /// Appends tracks to a playlist in a single request.
    pub async fn post_playlist_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), CatalogError> {
        if uris.len() > ADD_TRACKS_BATCH_SIZE {
            return Err(CatalogError::Decode(format!(
                "{} uris exceed the batch limit of {}",
                uris.len(),
                ADD_TRACKS_BATCH_SIZE
            )));
        }

        let path = format!("/playlists/{playlist_id}/tracks");
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self.post(&path).json(&body);
        let _: AddTrackToPlaylistResponse = self.send_json(request, &path).await?;
        Ok(())
    }
}
