use academy_auth_types::token::{TokenKind, validate_refresh_token};

use crate::domain::repository::{TokenBlacklist, UserRepository};
use crate::domain::types::TokenPair;
use crate::error::AcademyError;
use crate::usecase::password::verify_password;
use crate::usecase::token::{issue_token, issue_token_pair};

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<TokenPair, AcademyError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(AcademyError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AcademyError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "login");
        issue_token_pair(&user, &self.jwt_secret)
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshUseCase<U: UserRepository, B: TokenBlacklist> {
    pub users: U,
    pub blacklist: B,
    pub jwt_secret: String,
}

impl<U: UserRepository, B: TokenBlacklist> RefreshUseCase<U, B> {
    /// Exchange a live refresh token for a new access token carrying the user's current role.
    pub async fn execute(&self, refresh_token: &str) -> Result<String, AcademyError> {
        let claims = validate_refresh_token(refresh_token, &self.jwt_secret)
            .map_err(|_| AcademyError::InvalidRefreshToken)?;

        if self.blacklist.is_revoked(&claims.jti).await? {
            return Err(AcademyError::InvalidRefreshToken);
        }

        let user_id = claims
            .user_id()
            .map_err(|_| AcademyError::InvalidRefreshToken)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AcademyError::InvalidRefreshToken)?;

        issue_token(user.id, user.auth_role, TokenKind::Access, &self.jwt_secret)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<B: TokenBlacklist> {
    pub blacklist: B,
    pub jwt_secret: String,
}

impl<B: TokenBlacklist> LogoutUseCase<B> {
    /// Blacklist the caller's refresh token for the rest of its lifetime.
    pub async fn execute(&self, caller_id: i64, refresh_token: &str) -> Result<(), AcademyError> {
        let claims = validate_refresh_token(refresh_token, &self.jwt_secret)
            .map_err(|_| AcademyError::InvalidToken)?;

        if claims.user_id().ok() != Some(caller_id) {
            return Err(AcademyError::InvalidToken);
        }

        let ttl = claims.remaining_secs().max(1);
        if !self.blacklist.revoke(&claims.jti, ttl).await? {
            return Err(AcademyError::TokenBlacklisted);
        }

        tracing::info!(user_id = caller_id, "logout");
        Ok(())
    }
}
