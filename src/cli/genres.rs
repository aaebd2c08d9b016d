use tabled::Table;

use crate::{config::Config, curation, error, types::GenreTableRow};

use super::{login, spinner};

pub async fn genres(config: &Config, playlist_id: &str) {
    let catalog = login(config).await;

    let pb = spinner("Classifying playlist tracks...");
    let index = match curation::playlist_index(&catalog, playlist_id).await {
        Ok(index) => index,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot classify playlist {}: {}", playlist_id, e);
        }
    };
    pb.finish_and_clear();

    if index.is_empty() {
        println!("No genres found in playlist {playlist_id}");
        return;
    }

    let rows: Vec<GenreTableRow> = index
        .genres()
        .into_iter()
        .map(|genre| GenreTableRow {
            tracks: index.tracks(&genre).len(),
            genre,
        })
        .collect();

    println!("Playlist: {playlist_id}\n{}\n", Table::new(rows));
}
