use chrono::Utc;
use reqwest::Client;

use crate::{
    config::Config,
    error::SetError,
    spotify,
    types::{AccessToken, Token},
    warning,
};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Returns a usable access token, refreshing it first when it expired.
    ///
    /// Returns the refreshed [`Token`] alongside so the caller can store it.
    /// A failed refresh means the user has to log in again.
    pub async fn get_valid_token(
        &mut self,
        http: &Client,
        config: &Config,
    ) -> Result<(AccessToken, Option<Token>), SetError> {
        if !self.is_expired() {
            return Ok((AccessToken::from(&self.token), None));
        }

        match spotify::auth::refresh_token(http, config, &self.token.refresh_token).await {
            Ok(new_token) => {
                self.token = new_token.clone();
                Ok((AccessToken::from(&self.token), Some(new_token)))
            }
            Err(e) => {
                warning!("Token refresh failed: {}", e);
                Err(SetError::Unauthenticated)
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }

    fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }
}
