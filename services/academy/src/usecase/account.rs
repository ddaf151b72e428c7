use validator::Validate;

use academy_auth_types::identity::Identity;
use academy_domain::contact::is_phone;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfileChanges, User};
use crate::error::AcademyError;
use crate::usecase::registration::reachable_email;

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetAccountUseCase<U> {
    pub async fn execute(&self, id: i64) -> Result<User, AcademyError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::UserNotFound)
    }
}

// ── UpdateAccount ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateAccountInput {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(custom(function = "reachable_email"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

pub struct UpdateAccountUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateAccountUseCase<U> {
    /// Only the account owner or an admin may update an account.
    pub async fn execute(
        &self,
        caller: Identity,
        id: i64,
        input: UpdateAccountInput,
    ) -> Result<User, AcademyError> {
        if caller.user_id != id && !caller.is_admin() {
            return Err(AcademyError::Forbidden);
        }

        let input = UpdateAccountInput {
            username: input.username.map(|s| s.trim().to_owned()),
            email: input.email.map(|s| s.trim().to_owned()),
            phone_number: input.phone_number.map(|s| s.trim().to_owned()),
        };
        input.validate()?;
        if let Some(ref phone) = input.phone_number {
            if !is_phone(phone) {
                return Err(AcademyError::InvalidInput(
                    "Enter a valid phone number.".to_owned(),
                ));
            }
        }

        let current = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::UserNotFound)?;

        let changes = ProfileChanges {
            username: input.username,
            email: input.email,
            phone_number: input.phone_number,
        };
        if changes.is_empty() {
            return Ok(current);
        }
        self.ensure_unique(id, &changes).await?;

        let user = self.users.update_profile(id, &changes).await?;
        tracing::info!(user_id = id, updated_by = caller.user_id, "account updated");
        Ok(user)
    }

    async fn ensure_unique(&self, id: i64, changes: &ProfileChanges) -> Result<(), AcademyError> {
        let taken_by_other = |found: Option<User>| found.is_some_and(|u| u.id != id);

        if let Some(ref username) = changes.username {
            if taken_by_other(self.users.find_by_username(username).await?) {
                return Err(AcademyError::Duplicate("username"));
            }
        }
        if let Some(ref email) = changes.email {
            if taken_by_other(self.users.find_by_email(email).await?) {
                return Err(AcademyError::Duplicate("email"));
            }
        }
        if let Some(ref phone) = changes.phone_number {
            if taken_by_other(self.users.find_by_phone(phone).await?) {
                return Err(AcademyError::Duplicate("phone_number"));
            }
        }
        Ok(())
    }
}
