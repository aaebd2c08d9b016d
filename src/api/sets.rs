use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
};

use crate::{
    curation::{self, FavoritesRequest, SeededShuffle, SetRequest},
    error::SetError,
    server::AppState,
    success,
    types::{
        CreateSetPayload, CreateSetResponse, FavoritesPayload, FavoritesResponse, GenresResponse,
    },
};

use super::session::catalog_for;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, SetError> {
    payload
        .map(|Json(p)| p)
        .map_err(|_| SetError::InvalidRequest("request body must be a JSON object".to_string()))
}

pub async fn create_set(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateSetPayload>, JsonRejection>,
) -> Result<Json<CreateSetResponse>, SetError> {
    let catalog = catalog_for(&state, &headers).await?;
    let request = SetRequest::try_from(body(payload)?)?;

    let mut shuffler = SeededShuffle::fresh();
    let set = curation::create_set(&catalog, &request, &mut shuffler).await?;
    success!(
        "Set {} created with {} tracks",
        set.playlist_id,
        set.set_details.len()
    );

    Ok(Json(CreateSetResponse {
        status: "Playlist created successfully!".to_string(),
        playlist_id: set.playlist_id,
        set_details: set.set_details,
    }))
}

pub async fn playlist_genres(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(playlist_id): Path<String>,
) -> Result<Json<GenresResponse>, SetError> {
    let catalog = catalog_for(&state, &headers).await?;
    let genres = curation::playlist_genres(&catalog, &playlist_id).await?;
    Ok(Json(GenresResponse { genres }))
}

pub async fn favorites_playlist(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<FavoritesPayload>, JsonRejection>,
) -> Result<Json<FavoritesResponse>, SetError> {
    let catalog = catalog_for(&state, &headers).await?;
    let request = FavoritesRequest::try_from(body(payload)?)?;

    let playlist_id = curation::favorites_playlist(&catalog, &request).await?;
    success!("Favorites playlist {} created", playlist_id);

    Ok(Json(FavoritesResponse {
        status: "Favorites playlist created successfully!".to_string(),
        playlist_id,
    }))
}
