use crate::{
    error::CatalogError,
    types::{GetUserPlaylistsResponse, PlaylistSummary, User},
};

use super::SpotifyClient;

const USER_PLAYLISTS_PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    pub async fn get_current_user(&self) -> Result<User, CatalogError> {
        let request = self.get("/me");
        self.send_json(request, "/me").await
    }

    /// Retrieves every playlist of the current user, following pagination.
    pub async fn get_user_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        let mut playlists = Vec::new();
        let mut offset = 0;

        loop {
            let request = self.get("/me/playlists").query(&[
                ("limit", USER_PLAYLISTS_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ]);
            let page: GetUserPlaylistsResponse = self.send_json(request, "/me/playlists").await?;
            let fetched = page.items.len() as u32;

            playlists.extend(page.items.into_iter().map(PlaylistSummary::from));

            if page.next.is_none() || fetched == 0 {
                return Ok(playlists);
            }
            offset += fetched;
        }
    }
}
