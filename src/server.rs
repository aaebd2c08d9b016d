use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{
    api, config::Config, info, management::SessionManager, spotify::SpotifyClient,
    types::AccessToken,
};

/// Shared state of the web service.
///
/// Cloned into every handler; the session store and the HTTP client are
/// reference counted so all clones see the same data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionManager,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_sessions(config, SessionManager::new())
    }

    pub fn with_sessions(config: Config, sessions: SessionManager) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            http: Client::new(),
        }
    }

    /// Builds a catalog client acting on behalf of `token`.
    pub fn catalog(&self, token: AccessToken) -> SpotifyClient {
        SpotifyClient::new(self.http.clone(), self.config.api_url.clone(), token)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/check-auth", get(api::check_auth))
        .route("/sign_out", get(api::sign_out))
        .route("/user-playlists", get(api::user_playlists))
        .route("/create-set", post(api::create_set))
        .route("/favorites-playlist", post(api::favorites_playlist))
        .route("/playlist-genres/{playlist_id}", get(api::playlist_genres))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Binds the configured address and serves the API until the process stops.
pub async fn start_api_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.server_addr;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
