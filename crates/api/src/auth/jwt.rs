//! Session token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. They are
//! stateless: nothing is stored server-side and there is no revocation list.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::types::DocId;

/// Default token lifetime: 90 days.
pub const DEFAULT_EXPIRY_SECS: i64 = 90 * 24 * 60 * 60;

/// Longest accepted token lifetime: ten years.
pub const MAX_EXPIRY_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account id.
    pub sub: DocId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token signing and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiry_secs: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_secs", &self.expiry_secs)
            .finish()
    }
}

/// Generate an HS256 session token for the given account.
pub fn generate_token(
    user_id: DocId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now.saturating_add(config.expiry_secs),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Classify a validation failure: expiry is reported separately from every
/// other kind of bad token.
pub fn credential_error(err: &jsonwebtoken::errors::Error) -> CoreError {
    match err.kind() {
        ErrorKind::ExpiredSignature => CoreError::ExpiredCredential,
        _ => CoreError::InvalidCredential,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use showcase_core::types::new_doc_id;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_secs: DEFAULT_EXPIRY_SECS,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let id = new_doc_id();
        let token = generate_token(id, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.exp - claims.iat, DEFAULT_EXPIRY_SECS);
    }

    #[test]
    fn test_expired_token_is_classified_as_expired() {
        let config = test_config();

        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: new_doc_id(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let err = validate_token(&token, &config).expect_err("expired token must fail");
        assert_matches!(credential_error(&err), CoreError::ExpiredCredential);
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_secs: 60,
        };

        let token = generate_token(new_doc_id(), &test_config()).unwrap();
        let err = validate_token(&token, &config_b).expect_err("foreign signature must fail");
        assert_matches!(credential_error(&err), CoreError::InvalidCredential);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = validate_token("not-a-jwt", &test_config()).unwrap_err();
        assert_matches!(credential_error(&err), CoreError::InvalidCredential);
    }

    #[test]
    fn test_debug_hides_secret() {
        assert!(!format!("{:?}", test_config()).contains("long-enough"));
    }
}
