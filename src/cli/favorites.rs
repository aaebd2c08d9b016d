use crate::{
    config::Config,
    curation::{self, FavoritesRequest},
    error, success,
    types::{TimeRange, Visibility},
};

use super::{login, spinner};

pub async fn favorites(
    config: &Config,
    name: String,
    limit: u32,
    range: TimeRange,
    public: bool,
) {
    let request = FavoritesRequest {
        limit,
        range,
        name,
        visibility: if public {
            Visibility::Public
        } else {
            Visibility::Private
        },
    };

    let catalog = login(config).await;

    let pb = spinner("Collecting top tracks...");
    match curation::favorites_playlist(&catalog, &request).await {
        Ok(playlist_id) => {
            pb.finish_and_clear();
            success!("Favorites playlist {} created", playlist_id);
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot create favorites playlist: {}", e);
        }
    }
}
