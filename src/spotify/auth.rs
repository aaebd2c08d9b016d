use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{config::Config, error::CatalogError, types::Token};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Builds the authorization URL the browser is sent to.
///
/// # Arguments
///
/// * `config` - Provides the endpoint, client id, redirect uri and scope
/// * `code_challenge` - S256 challenge derived from the PKCE verifier
/// * `state` - Opaque value echoed back on the callback
///
/// # Errors
///
/// Fails only when `SPOTIFY_API_AUTH_URL` is not a valid URL.
pub fn authorize_url(
    config: &Config,
    code_challenge: &str,
    state: &str,
) -> Result<String, CatalogError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", config.scope.as_str()),
            ("state", state),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| CatalogError::Decode(format!("invalid authorization url: {e}")))?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the login: the `verifier` must be the one whose challenge was
/// sent in [`authorize_url`].
///
/// # Errors
///
/// A rejected code or verifier is [`CatalogError::Unauthorized`]; network and
/// parsing problems are returned as the matching [`CatalogError`] variant.
pub async fn exchange_code_pkce(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, CatalogError> {
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let token = decode_token_response(response).await?;
    Ok(token.into_token(None))
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token; when the response does
/// not carry a new one the previous value is kept.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, CatalogError> {
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ])
        .send()
        .await?;

    let token = decode_token_response(response).await?;
    Ok(token.into_token(Some(refresh_token)))
}

async fn decode_token_response(response: reqwest::Response) -> Result<TokenResponse, CatalogError> {
    let status = response.status();
    // the accounts service answers bad grants with 400, not 401
    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
        return Err(CatalogError::Unauthorized);
    }
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            endpoint: "/api/token".to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| CatalogError::Decode(format!("token response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn config() -> Config {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            client_id: "client-123".to_string(),
            redirect_uri: "http://localhost:5001/callback".to_string(),
            scope: "user-top-read playlist-modify-public".to_string(),
            auth_url: "https://accounts.example.com/authorize".to_string(),
            token_url: "https://accounts.example.com/api/token".to_string(),
            api_url: "https://api.example.com/v1".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn authorize_url_encodes_all_parameters() {
        let url = authorize_url(&config(), "challenge", "state-1").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let params: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.starts_with("https://accounts.example.com/authorize?"));
        assert!(params.contains(&("client_id".into(), "client-123".into())));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "http://localhost:5001/callback".into()
        )));
        assert!(params.contains(&(
            "scope".into(),
            "user-top-read playlist-modify-public".into()
        )));
        assert!(params.contains(&("state".into(), "state-1".into())));
        assert!(params.contains(&("code_challenge_method".into(), "S256".into())));
    }

    #[test]
    fn refresh_keeps_previous_refresh_token_when_not_rotated() {
        let response = TokenResponse {
            access_token: "new".to_string(),
            refresh_token: None,
            scope: None,
            expires_in: Some(3600),
        };
        let token = response.into_token(Some("old-refresh"));

        assert_eq!(token.access_token, "new");
        assert_eq!(token.refresh_token, "old-refresh");
    }
}
