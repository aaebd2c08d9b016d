use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque identifier for browser sessions and OAuth `state` values.
pub fn generate_session_id() -> String {
    random_alphanumeric(48)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Splits the comma separated genre list of a create-set request.
///
/// Labels are matched verbatim against the catalog vocabulary, so nothing is
/// trimmed or case-folded. Empty segments are dropped.
pub fn parse_genres(genres: Option<&str>) -> Vec<String> {
    genres
        .map(|g| {
            g.split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Extracts the bare id out of a `spotify:track:<id>` uri.
///
/// Anything that is not a uri is returned unchanged.
pub fn track_id_from_uri(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// Returns the value of a cookie from a raw `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
