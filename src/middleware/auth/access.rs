//! Bearer token verification → `AuthenticatedClaims` in request extensions.
//!
//! Per request:
//! - `Authorization: Bearer <jwt>` is extracted
//! - signature / alg family / exp / nbf are verified against the process-wide key
//! - `aud` (and `azp` for `account` tokens) is checked
//! - the claim set is inserted for handlers, then `next` runs
//!
//! Any failure ends the request with 401; handlers never see a partially
//! authenticated request.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthenticatedClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Put every route of `router` behind bearer authentication.
///
/// ```ignore
/// let protected = Router::new().route("/upload", post(upload));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths still answer 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match state
        .auth
        .authenticate(req.headers().get(header::AUTHORIZATION))
    {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                error = ?err,
                method = %req.method(),
                path = %req.uri().path(),
                "request authentication failed"
            );
            return Err(AppError::Unauthorized(err));
        }
    };

    tracing::debug!(sub = claims.subject().unwrap_or("-"), "request authenticated");

    // middleware → extractor
    req.extensions_mut().insert(AuthenticatedClaims::new(claims));

    Ok(next.run(req).await)
}
