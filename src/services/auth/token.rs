use jsonwebtoken::{Validation, errors::ErrorKind};
use tracing::warn;

use super::{AuthError, ClaimSet, KeyFamily, VerificationKey};

/// Signature + temporal verification of bearer tokens.
///
/// `jsonwebtoken::Validation` is configured to check:
/// - signature, with the algorithm list pinned to the key's family
/// - `exp` (required) and `nbf` (when present), with the configured leeway
///
/// Audience is left to `ClaimsPolicy`, because `aud` may be a string or a list
/// and the `account` audience needs an extra `azp` check.
#[derive(Clone)]
pub struct TokenVerifier {
    key: VerificationKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &self.key)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: VerificationKey, leeway_seconds: u64) -> Self {
        let algorithms = key.family().algorithms();

        let mut validation = Validation::default();
        validation.algorithms = algorithms.to_vec();
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self { key, validation }
    }

    pub fn family(&self) -> KeyFamily {
        self.key.family()
    }

    /// Verify `token` and return its claims.
    ///
    /// Failure reasons are logged here; callers only see `SignatureInvalid`
    /// or `TokenExpired`.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|err| {
            warn!(error = %err, "malformed token header");
            AuthError::SignatureInvalid
        })?;

        // Algorithm confusion: the key, not the token header, decides the accepted family.
        if !self.family().admits(header.alg) {
            warn!(
                alg = ?header.alg,
                family = ?self.family(),
                "token algorithm does not match verification key family"
            );
            return Err(AuthError::SignatureInvalid);
        }

        let data =
            jsonwebtoken::decode::<ClaimSet>(token, self.key.decoding_key(), &self.validation)
                .map_err(|err| match err.kind() {
                    ErrorKind::ExpiredSignature => {
                        warn!("token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        warn!(error = %err, "token verification failed");
                        AuthError::SignatureInvalid
                    }
                })?;

        Ok(data.claims)
    }
}
