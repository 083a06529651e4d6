/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The auth middleware verifies the token and puts this into request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Signature / audience checks belong to middleware + services
 * - Lives for one request; never stored or shared across requests
 */
use std::sync::Arc;

use serde_json::Value;

use crate::services::auth::{Audience, ClaimSet};

/// Claims of a request that passed authentication.
///
/// Read-only: the claim set sits behind an `Arc` and exposes no mutation.
#[derive(Debug, Clone)]
pub struct AuthenticatedClaims(Arc<ClaimSet>);

impl AuthenticatedClaims {
    pub fn new(claims: ClaimSet) -> Self {
        Self(Arc::new(claims))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn subject(&self) -> Option<&str> {
        self.0.subject()
    }

    pub fn authorized_party(&self) -> Option<&str> {
        self.0.authorized_party()
    }

    pub fn audience(&self) -> Audience {
        self.0.audience()
    }
}
