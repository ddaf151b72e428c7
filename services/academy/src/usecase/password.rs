//! Argon2id password hashing and the authenticated password change.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::repository::UserRepository;
use crate::error::AcademyError;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash `password` with Argon2id and a random salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, AcademyError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AcademyError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// `false` for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not a PHC string");
            false
        }
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub password_one: String,
    pub password_two: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i64,
        input: ChangePasswordInput,
    ) -> Result<(), AcademyError> {
        if input.password_one != input.password_two {
            return Err(AcademyError::PasswordMismatch);
        }
        if input.password_one.chars().count() < MIN_PASSWORD_LEN {
            return Err(AcademyError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AcademyError::UserNotFound)?;

        let hash = hash_password(&input.password_one)?;
        self.users.set_password_hash(user_id, &hash).await?;
        tracing::info!(user_id, "password changed");
        Ok(())
    }
}
