use axum::http::HeaderValue;

use crate::config::Config;

use super::{AuthError, ClaimSet, ClaimsPolicy, KeyError, TokenVerifier, VerificationKey, bearer};

/// Bearer-token authentication for one service.
///
/// extract → verify signature/expiry → check audience, in that order. The first
/// failing stage decides the rejection; nothing is retried.
#[derive(Debug, Clone)]
pub struct Authenticator {
    verifier: TokenVerifier,
    policy: ClaimsPolicy,
}

impl Authenticator {
    pub fn new(key: VerificationKey, service_id: impl Into<String>, leeway_seconds: u64) -> Self {
        Self {
            verifier: TokenVerifier::new(key, leeway_seconds),
            policy: ClaimsPolicy::new(service_id),
        }
    }

    /// Load the verification key from `Config` and build the authenticator.
    pub fn from_config(config: &Config) -> Result<Self, KeyError> {
        let key = VerificationKey::from_material(&config.key_material)?;

        Ok(Self::new(
            key,
            config.service_id.clone(),
            config.leeway_seconds,
        ))
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn policy(&self) -> &ClaimsPolicy {
        &self.policy
    }

    /// Authenticate a request from its `Authorization` header.
    pub fn authenticate(&self, authorization: Option<&HeaderValue>) -> Result<ClaimSet, AuthError> {
        let token = bearer::extract_bearer(authorization)?;
        let claims = self.verifier.verify(token)?;
        self.policy.check(&claims)?;

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::{Value, json};

    const SECRET: &[u8] = b"test-secret";

    fn authenticator() -> Authenticator {
        Authenticator::new(
            VerificationKey::from_secret(SECRET).unwrap(),
            "dropgox-backend",
            0,
        )
    }

    fn bearer(claims: Value) -> HeaderValue {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 300
    }

    #[test]
    fn stages_run_in_order() {
        let auth = authenticator();

        assert_eq!(auth.authenticate(None), Err(AuthError::CredentialMissing));

        // A malformed header never reaches signature checks.
        let basic = HeaderValue::from_static("Basic xyz");
        assert_eq!(
            auth.authenticate(Some(&basic)),
            Err(AuthError::CredentialMalformed)
        );

        let garbage = HeaderValue::from_static("Bearer garbage");
        assert_eq!(
            auth.authenticate(Some(&garbage)),
            Err(AuthError::SignatureInvalid)
        );

        let other_aud = bearer(json!({"aud": "other", "exp": exp()}));
        assert_eq!(
            auth.authenticate(Some(&other_aud)),
            Err(AuthError::AudienceNotPermitted)
        );
    }

    #[test]
    fn same_token_authenticates_repeatedly() {
        let auth = authenticator();
        let header = bearer(json!({"sub": "u-1", "aud": ["dropgox-backend"], "exp": exp()}));

        for _ in 0..3 {
            let claims = auth.authenticate(Some(&header)).unwrap();
            assert_eq!(claims.subject(), Some("u-1"));
        }
    }

    #[test]
    fn builds_from_config() {
        let config = Config::from_lookup(8080, |key| match key {
            "JWT_SECRET" => Some("test-secret".to_string()),
            "AUTH_SERVICE_ID" => Some("files".to_string()),
            _ => None,
        })
        .unwrap();

        let auth = Authenticator::from_config(&config).unwrap();
        assert_eq!(auth.policy().service_id(), "files");
        assert_eq!(auth.verifier().family(), crate::services::auth::KeyFamily::Hmac);
    }
}
