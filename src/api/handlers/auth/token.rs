//! Stateless session tokens (HS256 JWT).
//!
//! A token binds an account id (`sub`) to an expiry. Nothing is stored
//! server-side; verification checks signature, issuer and expiry only.

use jsonwebtoken::{Header, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ulid::Ulid;
use uuid::Uuid;

use super::{state::AuthState, utils::now_unix_seconds};
use crate::api::handlers::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

pub(super) fn encode_claims(state: &AuthState, claims: &SessionClaims) -> Result<String, ApiError> {
    encode(&Header::default(), claims, state.encoding_key())
        .map_err(|err| ApiError::Internal(format!("failed to sign session token: {err}")))
}

/// Issue a token for `account_id` valid for the configured TTL.
pub fn issue(state: &AuthState, account_id: Uuid) -> Result<IssuedToken, ApiError> {
    let now = now_unix_seconds();
    let ttl = state.config().token_ttl_seconds();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        iss: state.config().token_issuer().to_string(),
        iat: now,
        exp: now.saturating_add(ttl),
        jti: Ulid::new().to_string(),
    };

    Ok(IssuedToken {
        token: encode_claims(state, &claims)?,
        expires_in: ttl,
    })
}

/// Verify a token and return the account id it was issued for.
pub fn verify(state: &AuthState, token: &str) -> Result<Uuid, ApiError> {
    let data = decode::<SessionClaims>(token, state.decoding_key(), state.validation()).map_err(
        |err| {
            debug!("session token rejected: {err}");
            match err.kind() {
                ErrorKind::ExpiredSignature => ApiError::Auth("Token expired"),
                _ => ApiError::Auth("Invalid token"),
            }
        },
    )?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::Auth("Invalid token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::AuthConfig;
    use anyhow::Result;
    use secrecy::SecretString;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn state() -> AuthState {
        AuthState::new(AuthConfig::new(), &SecretString::from(SECRET))
    }

    #[test]
    fn issued_token_verifies_to_account() -> Result<()> {
        let state = state();
        let account_id = Uuid::new_v4();
        let issued = issue(&state, account_id)?;
        assert_eq!(issued.expires_in, 3600);
        assert_eq!(verify(&state, &issued.token)?, account_id);
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> Result<()> {
        let state = state();
        let now = now_unix_seconds();
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            iss: "reckon".to_string(),
            iat: now - 120,
            exp: now - 60,
            jti: Ulid::new().to_string(),
        };
        let token = encode_claims(&state, &claims)?;
        assert!(matches!(verify(&state, &token), Err(ApiError::Auth("Token expired"))));
        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> Result<()> {
        let other = AuthState::new(
            AuthConfig::new(),
            &SecretString::from("another-secret-another-secret-another"),
        );
        let issued = issue(&other, Uuid::new_v4())?;
        assert!(matches!(verify(&state(), &issued.token), Err(ApiError::Auth("Invalid token"))));
        Ok(())
    }

    #[test]
    fn token_from_other_issuer_is_rejected() -> Result<()> {
        let foreign = AuthState::new(
            AuthConfig::new().with_token_issuer("someone-else".to_string()),
            &SecretString::from(SECRET),
        );
        let issued = issue(&foreign, Uuid::new_v4())?;
        assert!(verify(&state(), &issued.token).is_err());
        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let state = state();
        for token in ["", "not-a-jwt", "a.b.c"] {
            assert!(matches!(verify(&state, token), Err(ApiError::Auth(_))));
        }
    }

    #[test]
    fn non_uuid_subject_is_rejected() -> Result<()> {
        let state = state();
        let now = now_unix_seconds();
        let claims = SessionClaims {
            sub: "user1".to_string(),
            iss: "reckon".to_string(),
            iat: now,
            exp: now + 60,
            jti: Ulid::new().to_string(),
        };
        let token = encode_claims(&state, &claims)?;
        assert!(matches!(verify(&state, &token), Err(ApiError::Auth("Invalid token"))));
        Ok(())
    }
}
