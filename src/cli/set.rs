use tabled::Table;

use crate::{
    config::Config,
    curation::{self, SeededShuffle, SetRequest},
    error, success,
    types::{SetDetailTableRow, Visibility},
    utils,
};

use super::{login, spinner};

#[derive(Debug, Clone)]
pub struct SetOptions {
    pub playlist_id: String,
    pub name: String,
    pub genres: Option<String>,
    pub duration: Option<u32>,
    pub public: bool,
    pub seed: Option<u64>,
}

impl From<SetOptions> for SetRequest {
    fn from(opts: SetOptions) -> Self {
        SetRequest {
            playlist_id: opts.playlist_id,
            name: opts.name,
            visibility: if opts.public {
                Visibility::Public
            } else {
                Visibility::Private
            },
            genres: utils::parse_genres(opts.genres.as_deref()),
            duration_minutes: opts.duration.filter(|d| *d > 0),
        }
    }
}

pub async fn create_set(config: &Config, opts: SetOptions) {
    let mut shuffler = match opts.seed {
        Some(seed) => SeededShuffle::from_seed(seed),
        None => SeededShuffle::fresh(),
    };
    let request = SetRequest::from(opts);

    let catalog = login(config).await;

    let pb = spinner("Building set...");
    let set = match curation::create_set(&catalog, &request, &mut shuffler).await {
        Ok(set) => set,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot create set: {}", e);
        }
    };
    pb.finish_and_clear();

    success!(
        "Playlist {} created with {} tracks",
        set.playlist_id,
        set.set_details.len()
    );

    let rows: Vec<SetDetailTableRow> = set.set_details.iter().map(SetDetailTableRow::from).collect();
    println!("{}", Table::new(rows));
}
