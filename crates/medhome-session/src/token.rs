//! Session JWT issuing and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Default session lifetime in seconds (7 days).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 604800;

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub rut: String,
    pub name: String,
    pub exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims for the session token.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user ID (UUID string) |
/// | `rut` | normalized national ID |
/// | `name` | display name |
/// | `exp` | expiration, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub rut: String,
    pub name: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for the given identity. Returns the token and its
/// absolute expiry (seconds since epoch).
pub fn issue_session_token(
    user_id: Uuid,
    rut: &str,
    name: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), SessionError> {
    let exp = now_secs() + ttl_secs;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        rut: rut.to_owned(),
        name: name.to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(SessionError::Signing)?;
    Ok((token, exp))
}

/// Validate a session-token cookie value, returning the parsed identity.
///
/// Fails closed: signature mismatch, expiry, and malformed input each yield
/// an error — callers map all of them to 401.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionError::Malformed)?;

    Ok(SessionInfo {
        user_id,
        rut: data.claims.rut,
        name: data.claims.name,
        exp: data.claims.exp,
    })
}
