use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// OAuth token as returned by the accounts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Bearer credential handed to every catalog call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Token> for AccessToken {
    fn from(token: &Token) -> Self {
        AccessToken(token.access_token.clone())
    }
}

/// A login started by `/login` (or the CLI) and waiting for its callback.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub code_verifier: String,
    pub session_id: String,
    /// Where the browser goes after the code exchange. `None` renders a plain
    /// success page, which is what the terminal login uses.
    pub return_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: TrackAlbum,
}

impl Track {
    /// Playback length truncated to whole seconds.
    pub fn duration_secs(&self) -> u64 {
        self.duration_ms / 1000
    }

    /// The first credited artist.
    pub fn primary_artist(&self) -> Option<&TrackArtist> {
        self.artists.first()
    }

    pub fn primary_artist_id(&self) -> Option<&str> {
        self.primary_artist().and_then(|a| a.id.as_deref())
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.album.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// `null` for removed or unavailable entries.
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTotalResponse {
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTracksRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<UserPlaylist>,
    pub next: Option<String>,
}

/// Playlist entry as listed to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub tracks_total: u32,
    pub image: Option<String>,
}

impl From<UserPlaylist> for PlaylistSummary {
    fn from(p: UserPlaylist) -> Self {
        PlaylistSummary {
            tracks_total: p.tracks.map_or(0, |t| t.total),
            image: p.images.into_iter().next().map(|i| i.url),
            id: p.id,
            name: p.name,
        }
    }
}

/// Time window of the user's top tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            other => Err(format!(
                "unknown range '{other}', expected short_term, medium_term or long_term"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// A JSON value that front-ends send either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Integer value, if this holds a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Numeric::Int(i) => Some(*i),
            Numeric::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Body of `POST /create-set`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSetPayload {
    pub genres: Option<String>,
    pub playlist_name: Option<String>,
    pub playlist_visibility: Option<Numeric>,
    pub selected_playlist_id: Option<String>,
    pub duration: Option<Numeric>,
}

/// Body of `POST /favorites-playlist`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesPayload {
    pub limit: Option<Numeric>,
    pub range: Option<String>,
    pub playlist_name: Option<String>,
    pub playlist_visibility: Option<Numeric>,
}

/// One row of the shareable set timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDetail {
    pub artist: String,
    pub name: String,
    pub timestamp: String,
    pub album_cover: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSetResponse {
    pub status: String,
    pub playlist_id: String,
    pub set_details: Vec<SetDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub status: String,
    pub playlist_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub items: Vec<PlaylistSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct SetDetailTableRow {
    pub timestamp: String,
    pub artist: String,
    pub name: String,
}

impl From<&SetDetail> for SetDetailTableRow {
    fn from(d: &SetDetail) -> Self {
        SetDetailTableRow {
            timestamp: d.timestamp.clone(),
            artist: d.artist.clone(),
            name: d.name.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
