use thiserror::Error;

/// Reasons a request fails authentication.
///
/// Every variant ends up as `401 Unauthorized`. The `Display` text is what the
/// client sees, so it names the category only; the cause is logged where it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing credential")]
    CredentialMissing,

    #[error("malformed credential")]
    CredentialMalformed,

    #[error("invalid token")]
    SignatureInvalid,

    #[error("invalid token")]
    TokenExpired,

    #[error("invalid audience format")]
    AudienceFormat,

    #[error("audience not permitted")]
    AudienceNotPermitted,

    #[error("authorized party mismatch")]
    AuthorizedPartyMismatch,
}

impl AuthError {
    /// Stable machine-readable category for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CredentialMissing => "missing_credential",
            Self::CredentialMalformed => "malformed_credential",
            Self::SignatureInvalid | Self::TokenExpired => "invalid_token",
            Self::AudienceFormat | Self::AudienceNotPermitted => "invalid_audience",
            Self::AuthorizedPartyMismatch => "unauthorized_party",
        }
    }
}
