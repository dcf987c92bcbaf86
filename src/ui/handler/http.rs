//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the current room names, directory insertion order
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.repository.list_room_names().await)
}
