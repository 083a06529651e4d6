//! `Authorization: Bearer <token>` parsing.

use axum::http::HeaderValue;

use super::AuthError;

/// Pull the raw bearer token out of an `Authorization` header value.
///
/// - no header: `CredentialMissing`
/// - anything other than exactly `<scheme> <token>` with a case-insensitive
///   `bearer` scheme: `CredentialMalformed`
pub fn extract_bearer(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let raw = header
        .ok_or(AuthError::CredentialMissing)?
        .to_str()
        .map_err(|_| AuthError::CredentialMalformed)?;

    let mut parts = raw.split(' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::CredentialMalformed);
    };

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::CredentialMalformed);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> Result<String, AuthError> {
        let value = HeaderValue::from_str(raw).unwrap();
        extract_bearer(Some(&value)).map(str::to_owned)
    }

    #[test]
    fn missing_header_is_not_malformed() {
        assert_eq!(extract_bearer(None), Err(AuthError::CredentialMissing));
    }

    #[test]
    fn accepts_bearer_with_any_scheme_case() {
        assert_eq!(extract("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract("bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract("BEARER abc").unwrap(), "abc");
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(extract("Basic xyz"), Err(AuthError::CredentialMalformed));
        assert_eq!(extract("Token abc"), Err(AuthError::CredentialMalformed));
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!(extract("Bearer"), Err(AuthError::CredentialMalformed));
        assert_eq!(extract("Bearer "), Err(AuthError::CredentialMalformed));
        assert_eq!(extract("Bearer a b"), Err(AuthError::CredentialMalformed));
        assert_eq!(extract("Bearer  abc"), Err(AuthError::CredentialMalformed));
        assert_eq!(extract("abc"), Err(AuthError::CredentialMalformed));
    }

    #[test]
    fn rejects_non_ascii_header() {
        let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
        assert_eq!(
            extract_bearer(Some(&value)),
            Err(AuthError::CredentialMalformed)
        );
    }
}
