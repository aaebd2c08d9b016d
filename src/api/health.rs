use axum::response::Json;
use serde_json::{Value, json};

pub async fn index() -> &'static str {
    "Welcome to SetSmith!"
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
