use std::time::{Duration, Instant};

use crate::{
    api,
    config::Config,
    error,
    management::SessionManager,
    server::{self, AppState},
    spotify::SpotifyClient,
    success,
    types::{AccessToken, Token},
    utils, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Logs in through the browser and returns a catalog client for the session.
///
/// Starts the web service in the background so the OAuth callback has
/// somewhere to land, opens the authorization page and waits for the token.
/// The token lives only as long as the command.
pub async fn login(config: &Config) -> SpotifyClient {
    let state = AppState::new(config.clone());

    let server_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let session = utils::generate_session_id();
    let auth_url = match api::begin_login(&state, &session, None).await {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization url: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(&state.sessions, &session).await {
        Some(token) => {
            success!("Authentication successful!");
            state.catalog(AccessToken::from(&token))
        }
        None => error!("Authentication failed or timed out."),
    }
}

/// Polls the session store once a second until the callback stored a token.
async fn wait_for_token(sessions: &SessionManager, session: &str) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        if let Some(token) = sessions.token(session).await {
            return Some(token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
