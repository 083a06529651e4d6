//! Decoded token claims and the audience / authorized-party policy.
//!
//! Two kinds of tokens are admitted:
//! - tokens issued for this service directly (`aud` names the service)
//! - identity-provider default tokens with the generic `account` audience,
//!   narrowed by `azp` (the client the token was requested for)

use serde::Deserialize;
use serde_json::{Map, Value};

use super::AuthError;

/// Generic audience identity providers put on their default access tokens.
pub const ACCOUNT_AUDIENCE: &str = "account";

/// Claim set decoded from a verified token payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// A claim's value when it is a JSON string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn audience(&self) -> Audience {
        Audience::from_claim(self.get("aud"))
    }

    pub fn authorized_party(&self) -> Option<&str> {
        self.get_str("azp")
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }
}

/// Shape of the `aud` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Single(String),
    // Non-string entries are dropped.
    Multiple(Vec<String>),
    // Absent, or neither a string nor a list.
    Invalid,
}

impl Audience {
    pub fn from_claim(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Single(s.clone()),
            Some(Value::Array(items)) => Self::Multiple(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => Self::Invalid,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::Single(aud) => aud == id,
            Self::Multiple(auds) => auds.iter().any(|aud| aud == id),
            Self::Invalid => false,
        }
    }
}

/// Audience policy for a single service identifier.
#[derive(Debug, Clone)]
pub struct ClaimsPolicy {
    service_id: String,
}

impl ClaimsPolicy {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Check `aud` (and `azp` where it applies) against this service.
    pub fn check(&self, claims: &ClaimSet) -> Result<(), AuthError> {
        match claims.audience() {
            Audience::Invalid => Err(AuthError::AudienceFormat),

            Audience::Single(aud) => {
                if aud == self.service_id || aud == ACCOUNT_AUDIENCE {
                    Ok(())
                } else {
                    Err(AuthError::AudienceNotPermitted)
                }
            }

            audience @ Audience::Multiple(_) => {
                if audience.contains(ACCOUNT_AUDIENCE) {
                    // `account` alone says nothing about which client asked for the token.
                    if claims.authorized_party() == Some(self.service_id.as_str()) {
                        Ok(())
                    } else {
                        Err(AuthError::AuthorizedPartyMismatch)
                    }
                } else if audience.contains(&self.service_id) {
                    Ok(())
                } else {
                    Err(AuthError::AudienceNotPermitted)
                }
            }
        }
    }
}
