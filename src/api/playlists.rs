use axum::{Json, extract::State, http::HeaderMap};

use crate::{error::SetError, server::AppState, spotify::Catalog, types::PlaylistsResponse};

use super::session::catalog_for;

pub async fn user_playlists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PlaylistsResponse>, SetError> {
    let catalog = catalog_for(&state, &headers).await?;
    let items = catalog.user_playlists().await?;
    Ok(Json(PlaylistsResponse { items }))
}
