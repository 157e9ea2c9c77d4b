use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id the token was issued to.
    pub sub: i32,
    /// Issued-at, seconds since epoch.
    pub iat: usize,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

/// Signs a 24-hour access token for `user_id` with the configured secret.
pub fn generate_token(user_id: i32, secret: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now
        .checked_add_signed(chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
        .ok_or_else(|| AppError::internal("token expiry overflows the calendar"))?;

    let claims = Claims {
        sub: user_id,
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("failed to sign token: {}", e)))
}

/// Verifies signature and expiry, returning the decoded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_roundtrip() {
        let token = generate_token(42, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = generate_token(42, SECRET).unwrap();
        let error = verify_token(&token, "a-different-secret").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let issued = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(48))
            .unwrap()
            .timestamp() as usize;
        let claims = Claims {
            sub: 7,
            iat: issued,
            exp: issued + 60,
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let error = verify_token(&stale, SECRET).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert!(error.message().contains("ExpiredSignature"));
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let error = verify_token("not.a.token", SECRET).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }
}
