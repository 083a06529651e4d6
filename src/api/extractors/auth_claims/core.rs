use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AuthenticatedClaims;
use crate::error::AppError;
use crate::services::auth::AuthError;

/// Extractor handing `AuthenticatedClaims` to a handler.
/// Assumes the auth middleware already inserted them into request extensions;
/// if not (route not behind the middleware), responds 401 `missing_credential`.
pub struct AuthClaimsExtractor(pub AuthenticatedClaims);

impl<S> FromRequestParts<S> for AuthClaimsExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedClaims>()
            .cloned()
            .map(AuthClaimsExtractor)
            .ok_or(AppError::Unauthorized(AuthError::CredentialMissing))
    }
}
