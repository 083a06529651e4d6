/*
 * Responsibility
 * - URL layout of the service
 * - /health is public; every other route sits behind the bearer auth middleware
 */
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::api::handlers::{
    files::{delete, download, rename, stat, upload},
    health::health,
};
use crate::middleware::{self, http::HttpLimits};
use crate::state::AppState;

pub fn routes(state: AppState, limits: HttpLimits) -> Router<AppState> {
    let protected = Router::new()
        .route("/upload", post(upload))
        .route("/download/{filename}", get(download))
        .route("/rename", post(rename))
        .route("/files/{filename}", get(stat).delete(delete))
        .layer(DefaultBodyLimit::max(limits.body_limit()));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::auth::access::apply(protected, state))
}
