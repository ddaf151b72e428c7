//! JWT signing and validation for access and refresh tokens.

use academy_domain::user::AuthRole;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime in seconds (5 minutes).
pub const ACCESS_TOKEN_EXP: u64 = 5 * 60;

/// Refresh token lifetime in seconds (1 day).
pub const REFRESH_TOKEN_EXP: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn lifetime(self) -> u64 {
        match self {
            Self::Access => ACCESS_TOKEN_EXP,
            Self::Refresh => REFRESH_TOKEN_EXP,
        }
    }
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token type")]
    WrongKind,
}

/// JWT claims payload for both token kinds.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id, decimal string |
/// | `role` | custom | [`AuthRole`] at issue time |
/// | `token_type` | custom | `access` or `refresh` |
/// | `jti` | `jti` | UUID v4, blacklist key for refresh tokens |
/// | `iat` / `exp` | `iat` / `exp` | seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: AuthRole,
    pub token_type: TokenKind,
    pub jti: String,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    /// Fresh claims for `user_id`, expiring after the kind's lifetime.
    pub fn new(user_id: i64, role: AuthRole, kind: TokenKind) -> Self {
        let iat = jsonwebtoken::get_current_timestamp();
        Self {
            sub: user_id.to_string(),
            role,
            token_type: kind,
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + kind.lifetime(),
        }
    }

    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// Seconds until expiry, zero if already past.
    pub fn remaining_secs(&self) -> u64 {
        self.exp
            .saturating_sub(jsonwebtoken::get_current_timestamp())
    }
}

pub fn sign(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Validation: HS256, exp checked with default 60s leeway, required claims `exp` + `sub`.
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

fn decode_kind(token: &str, secret: &str, kind: TokenKind) -> Result<Claims, TokenError> {
    let claims = decode_jwt(token, secret)?;
    if claims.token_type != kind {
        return Err(TokenError::WrongKind);
    }
    claims.user_id()?;
    Ok(claims)
}

// ── Public ───────────────────────────────────────────────────────────────

pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode_kind(token, secret, TokenKind::Access)
}

pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode_kind(token, secret, TokenKind::Refresh)
}
