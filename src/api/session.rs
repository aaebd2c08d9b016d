use axum::http::{HeaderMap, header};

use crate::{
    error::SetError,
    server::AppState,
    spotify::SpotifyClient,
    types::AccessToken,
    utils,
};

pub const SESSION_COOKIE: &str = "setsmith_session";

/// Session id carried by the `setsmith_session` cookie.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookie| utils::cookie_value(cookie, SESSION_COOKIE))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Token passed directly as `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<AccessToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| AccessToken(t.to_string()))
}

pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Resolves the caller's credential and builds a catalog client for it.
pub async fn catalog_for(state: &AppState, headers: &HeaderMap) -> Result<SpotifyClient, SetError> {
    let token = match bearer_token(headers) {
        Some(token) => token,
        None => {
            let session_id = session_id(headers).ok_or(SetError::Unauthenticated)?;
            state
                .sessions
                .access_token(&session_id, &state.http, &state.config)
                .await?
        }
    };

    Ok(state.catalog(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_id_is_read_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; setsmith_session=abc123"),
        );
        assert_eq!(session_id(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn bearer_token_requires_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(bearer_token(&headers), Some(AccessToken("tok".to_string())));
    }
}
