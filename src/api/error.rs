use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::{error::SetError, warning};

/// Maps curation failures to HTTP responses.
///
/// Unauthenticated callers are sent to the login flow. Catalog failures are
/// logged and reported without their details.
impl IntoResponse for SetError {
    fn into_response(self) -> Response {
        match self {
            SetError::Unauthenticated => Redirect::to("/login").into_response(),
            SetError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            SetError::CatalogUnavailable(e) => {
                warning!("Catalog call failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "catalog unavailable" })),
                )
                    .into_response()
            }
        }
    }
}
