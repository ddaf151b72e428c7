use academy_auth_types::token::{Claims, TokenKind, sign};
use academy_domain::user::AuthRole;

use crate::domain::types::{TokenPair, User};
use crate::error::AcademyError;

pub fn issue_token(
    user_id: i64,
    role: AuthRole,
    kind: TokenKind,
    secret: &str,
) -> Result<String, AcademyError> {
    let claims = Claims::new(user_id, role, kind);
    sign(&claims, secret).map_err(|e| AcademyError::Internal(e.into()))
}

/// Fresh access + refresh pair for `user`.
pub fn issue_token_pair(user: &User, secret: &str) -> Result<TokenPair, AcademyError> {
    Ok(TokenPair {
        access: issue_token(user.id, user.auth_role, TokenKind::Access, secret)?,
        refresh: issue_token(user.id, user.auth_role, TokenKind::Refresh, secret)?,
    })
}
