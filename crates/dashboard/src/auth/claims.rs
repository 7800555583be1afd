//! Token verification and the identity it derives.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopdeck_core::Role;

/// Authentication failures. All of them route to the gate's fail-closed
/// path; the detail only matters for logging.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was presented on a protected path.
    #[error("missing token")]
    MissingToken,

    /// Signature or structural verification failed.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The claim set decoded but a required claim is absent or empty.
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),

    /// The role claim is not one of the known roles.
    #[error("unknown role claim: {0}")]
    UnknownRole(String),
}

/// Claim set carried by backend-issued tokens.
///
/// `sub` is the user id; `role` gates the admin screens; `exp` is
/// validated by the verifier.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    role: String,
    exp: i64,
}

/// Identity derived from a verified token, attached to the request
/// context for downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

/// Verifies HS256 tokens against the shared backend secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self { key, validation }
    }

    /// Verify a token and derive the caller's identity.
    ///
    /// # Errors
    ///
    /// Fails closed: bad signature, expired `exp`, missing `sub` or
    /// `role`, and unknown role values are all errors.
    pub fn verify(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.is_empty() {
            return Err(AuthError::MissingClaim("sub"));
        }
        if claims.role.is_empty() {
            return Err(AuthError::MissingClaim("role"));
        }

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| AuthError::UnknownRole(claims.role))?;

        Ok(CurrentUser {
            id: claims.sub,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("0123456789abcdef0123456789abcdef")
    }

    fn sign(claims: &serde_json::Value, key: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .expect("encode")
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_derives_identity() {
        let token = sign(
            &serde_json::json!({"sub": "u-1", "role": "ADMIN", "exp": future_exp()}),
            "0123456789abcdef0123456789abcdef",
        );
        let user = TokenVerifier::new(&secret()).verify(&token).expect("verify");
        assert_eq!(user.id, "u-1");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let token = sign(
            &serde_json::json!({"sub": "u-1", "role": "ADMIN", "exp": future_exp()}),
            "another-secret-another-secret-ab",
        );
        let err = TokenVerifier::new(&secret())
            .verify(&token)
            .expect_err("should fail");
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = sign(
            &serde_json::json!({"sub": "u-1", "role": "ADMIN", "exp": 1_000}),
            "0123456789abcdef0123456789abcdef",
        );
        assert!(TokenVerifier::new(&secret()).verify(&token).is_err());
    }

    #[test]
    fn test_missing_claims_rejected() {
        let verifier = TokenVerifier::new(&secret());

        let no_sub = sign(
            &serde_json::json!({"role": "ADMIN", "exp": future_exp()}),
            "0123456789abcdef0123456789abcdef",
        );
        assert!(matches!(
            verifier.verify(&no_sub),
            Err(AuthError::MissingClaim("sub"))
        ));

        let no_role = sign(
            &serde_json::json!({"sub": "u-1", "exp": future_exp()}),
            "0123456789abcdef0123456789abcdef",
        );
        assert!(matches!(
            verifier.verify(&no_role),
            Err(AuthError::MissingClaim("role"))
        ));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let token = sign(
            &serde_json::json!({"sub": "u-1", "role": "WIZARD", "exp": future_exp()}),
            "0123456789abcdef0123456789abcdef",
        );
        assert!(matches!(
            TokenVerifier::new(&secret()).verify(&token),
            Err(AuthError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(TokenVerifier::new(&secret()).verify("not-a-jwt").is_err());
    }
}
