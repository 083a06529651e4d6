/*
 * Responsibility
 * - Read environment configuration once at startup (JWT key material, storage dir, limits)
 * - Validate the values (anything missing or unusable fails startup)
 * - Pick the verification mode: RSA public key or HMAC secret, never both
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_SERVICE_ID: &str = "dropgox-backend";
pub const DEFAULT_STORAGE_DIR: &str = "./files";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    Ambiguous(&'static str, &'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Ambiguous(a, b) => {
                write!(f, "ambiguous verification key: both {} and {} are set", a, b)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw verification key material, as read from the environment.
///
/// Which variant is present decides the algorithm family the service accepts.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// `JWT_PUBLIC_KEY`: PEM-encoded RSA public key.
    RsaPublicPem(String),
    /// `JWT_SECRET`: HMAC secret, used verbatim.
    HmacSecret(String),
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        match self {
            KeyMaterial::RsaPublicPem(_) => f.write_str("RsaPublicPem(..)"),
            KeyMaterial::HmacSecret(_) => f.write_str("HmacSecret(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub storage_dir: PathBuf,
    pub max_upload_bytes: usize,

    pub service_id: String,
    pub leeway_seconds: u64,
    pub key_material: KeyMaterial,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `port` comes from the command line (which itself falls back to `PORT`).
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(port, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(var("APP_ENV"));

        let storage_dir = var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("MAX_UPLOAD_BYTES"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let service_id = var("AUTH_SERVICE_ID")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SERVICE_ID.to_string());

        let leeway_seconds = match var("AUTH_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("AUTH_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let key_material = match (var("JWT_PUBLIC_KEY"), var("JWT_SECRET")) {
            (Some(pem), None) => KeyMaterial::RsaPublicPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => KeyMaterial::HmacSecret(secret),
            (Some(_), Some(_)) => {
                return Err(ConfigError::Ambiguous("JWT_PUBLIC_KEY", "JWT_SECRET"));
            }
            (None, None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY or JWT_SECRET")),
        };

        Ok(Self {
            addr,
            app_env,
            storage_dir,
            max_upload_bytes,
            service_id,
            leeway_seconds,
            key_material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(8080, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_a_key_is_set() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.storage_dir, PathBuf::from(DEFAULT_STORAGE_DIR));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.service_id, DEFAULT_SERVICE_ID);
        assert_eq!(config.leeway_seconds, 0);
        assert_eq!(
            config.key_material,
            KeyMaterial::HmacSecret("s3cret".to_string())
        );
    }

    #[test]
    fn public_key_selects_rsa_mode_and_expands_escaped_newlines() {
        let config = load(&[("JWT_PUBLIC_KEY", "-----BEGIN PUBLIC KEY-----\\nabc")]).unwrap();

        assert_eq!(
            config.key_material,
            KeyMaterial::RsaPublicPem("-----BEGIN PUBLIC KEY-----\nabc".to_string())
        );
    }

    #[test]
    fn missing_key_material_is_fatal() {
        let err = load(&[("AUTH_SERVICE_ID", "svc")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_PUBLIC_KEY or JWT_SECRET"));

        let err = load(&[("JWT_SECRET", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn both_key_variables_are_rejected() {
        let err = load(&[("JWT_PUBLIC_KEY", "pem"), ("JWT_SECRET", "secret")]).unwrap_err();
        assert!(matches!(err, ConfigError::Ambiguous(_, _)));
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn numeric_settings_are_validated() {
        let err = load(&[("JWT_SECRET", "s"), ("AUTH_LEEWAY_SECONDS", "soon")]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("AUTH_LEEWAY_SECONDS"));

        let err = load(&[("JWT_SECRET", "s"), ("MAX_UPLOAD_BYTES", "0")]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("MAX_UPLOAD_BYTES"));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("JWT_SECRET", "s"),
            ("APP_ENV", "PROD"),
            ("STORAGE_DIR", "/srv/files"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("AUTH_SERVICE_ID", "files-api"),
            ("AUTH_LEEWAY_SECONDS", "30"),
        ])
        .unwrap();

        assert!(config.app_env.is_production());
        assert_eq!(config.storage_dir, PathBuf::from("/srv/files"));
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.service_id, "files-api");
        assert_eq!(config.leeway_seconds, 30);
    }
}
