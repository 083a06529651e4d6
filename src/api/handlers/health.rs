/*
 * Responsibility
 * - GET /health (liveness)
 * - Not behind the auth middleware
 */
use axum::Json;

use crate::api::dto::files::MessageResponse;

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("DropGox Backend is up and running!"))
}
