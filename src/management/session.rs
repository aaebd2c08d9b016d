use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::SetError,
    types::{AccessToken, PendingLogin, Token},
};

use super::TokenManager;

/// Seconds a started login waits for its callback before it is dropped.
pub const PENDING_LOGIN_TTL_SECS: i64 = 600;

#[derive(Debug)]
struct Pending {
    login: PendingLogin,
    started_at: i64,
}

impl Pending {
    fn is_expired(&self, now: i64) -> bool {
        now - self.started_at >= PENDING_LOGIN_TTL_SECS
    }
}

#[derive(Debug, Default)]
struct Sessions {
    tokens: HashMap<String, Token>,
    pending: HashMap<String, Pending>,
}

/// In-memory store of logged-in sessions and logins awaiting their callback.
///
/// Cloning shares the same store. Nothing is persisted; a restart logs every
/// user out.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    inner: Arc<Mutex<Sessions>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a login under its OAuth `state` until the callback arrives.
    ///
    /// Logins older than [`PENDING_LOGIN_TTL_SECS`] are dropped first.
    pub async fn begin_login(&self, state: String, login: PendingLogin) {
        self.begin_login_at(state, login, Utc::now().timestamp()).await
    }

    async fn begin_login_at(&self, state: String, login: PendingLogin, now: i64) {
        let mut inner = self.inner.lock().await;
        inner.pending.retain(|_, p| !p.is_expired(now));
        inner.pending.insert(
            state,
            Pending {
                login,
                started_at: now,
            },
        );
    }

    /// Takes the pending login for `state`. Each state can be completed once,
    /// and only before it expires.
    pub async fn complete_login(&self, state: &str) -> Option<PendingLogin> {
        self.complete_login_at(state, Utc::now().timestamp()).await
    }

    async fn complete_login_at(&self, state: &str, now: i64) -> Option<PendingLogin> {
        let pending = self.inner.lock().await.pending.remove(state)?;
        (!pending.is_expired(now)).then_some(pending.login)
    }

    pub async fn store_token(&self, session_id: &str, token: Token) {
        self.inner
            .lock()
            .await
            .tokens
            .insert(session_id.to_string(), token);
    }

    pub async fn token(&self, session_id: &str) -> Option<Token> {
        self.inner.lock().await.tokens.get(session_id).cloned()
    }

    pub async fn is_logged_in(&self, session_id: &str) -> bool {
        self.inner.lock().await.tokens.contains_key(session_id)
    }

    pub async fn sign_out(&self, session_id: &str) {
        self.inner.lock().await.tokens.remove(session_id);
    }

    /// Resolves a session to a usable access token.
    ///
    /// Expired tokens are refreshed and the refreshed token replaces the
    /// stored one. The lock is not held while talking to the accounts service.
    pub async fn access_token(
        &self,
        session_id: &str,
        http: &Client,
        config: &Config,
    ) -> Result<AccessToken, SetError> {
        let token = self.token(session_id).await.ok_or(SetError::Unauthenticated)?;

        let mut token_mgr = TokenManager::new(token);
        match token_mgr.get_valid_token(http, config).await {
            Ok((access, Some(refreshed))) => {
                self.store_token(session_id, refreshed).await;
                Ok(access)
            }
            Ok((access, None)) => Ok(access),
            Err(e) => {
                self.sign_out(session_id).await;
                Err(e)
            }
        }
    }
}
