use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey};
use thiserror::Error;

use crate::config::KeyMaterial;

const RSA_ALGORITHMS: &[Algorithm] = &[Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
const HMAC_ALGORITHMS: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("JWT public key is empty")]
    EmptyPublicKey,

    #[error("invalid RSA public key pem: {0}")]
    InvalidPublicKey(#[source] jsonwebtoken::errors::Error),

    #[error("JWT secret is empty")]
    EmptySecret,
}

/// Signature algorithm family a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Rsa,
    Hmac,
}

impl KeyFamily {
    /// Algorithms a token may declare when verified with a key of this family.
    pub fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Rsa => RSA_ALGORITHMS,
            Self::Hmac => HMAC_ALGORITHMS,
        }
    }

    pub fn admits(self, alg: Algorithm) -> bool {
        self.algorithms().contains(&alg)
    }
}

/// The process-wide verification key.
///
/// Built once at startup and only ever read afterwards.
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub enum VerificationKey {
    Rsa(DecodingKey),
    Hmac(DecodingKey),
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationKey")
            .field("family", &self.family())
            .finish_non_exhaustive()
    }
}

impl VerificationKey {
    pub fn from_material(material: &KeyMaterial) -> Result<Self, KeyError> {
        match material {
            KeyMaterial::RsaPublicPem(pem) => Self::from_rsa_pem(pem),
            KeyMaterial::HmacSecret(secret) => Self::from_secret(secret.as_bytes()),
        }
    }

    /// Parse a PEM-encoded RSA public key (`PUBLIC KEY` or `RSA PUBLIC KEY`).
    pub fn from_rsa_pem(pem: &str) -> Result<Self, KeyError> {
        if pem.trim().is_empty() {
            return Err(KeyError::EmptyPublicKey);
        }

        DecodingKey::from_rsa_pem(pem.as_bytes())
            .map(Self::Rsa)
            .map_err(KeyError::InvalidPublicKey)
    }

    pub fn from_secret(secret: &[u8]) -> Result<Self, KeyError> {
        if secret.is_empty() {
            return Err(KeyError::EmptySecret);
        }

        Ok(Self::Hmac(DecodingKey::from_secret(secret)))
    }

    pub fn family(&self) -> KeyFamily {
        match self {
            Self::Rsa(_) => KeyFamily::Rsa,
            Self::Hmac(_) => KeyFamily::Hmac,
        }
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        match self {
            Self::Rsa(key) | Self::Hmac(key) => key,
        }
    }
}
