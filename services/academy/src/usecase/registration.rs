use validator::{Validate, ValidationError};

use academy_domain::contact::{is_email, is_phone};
use academy_domain::user::AuthType;

use crate::domain::repository::UserRepository;
use crate::domain::types::NewUser;
use crate::error::AcademyError;
use crate::usecase::password::hash_password;

#[derive(Debug, Clone, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(custom(function = "reachable_email"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Accept only addresses the reset flow can later look the account up by.
pub(crate) fn reachable_email(email: &str) -> Result<(), ValidationError> {
    if is_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Enter a valid email address.".into()))
    }
}

impl RegisterInput {
    /// Trim fields and drop blank contacts.
    fn normalized(self) -> Self {
        let blank_to_none = |v: Option<String>| {
            v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
        };
        Self {
            username: self.username.trim().to_owned(),
            email: blank_to_none(self.email),
            phone_number: blank_to_none(self.phone_number),
            password: self.password,
        }
    }
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    /// Create an `unconfirmed` account and return its id. No code is sent.
    pub async fn execute(&self, input: RegisterInput) -> Result<i64, AcademyError> {
        let input = input.normalized();
        input.validate()?;

        let auth_type = match (&input.email, &input.phone_number) {
            (None, None) => {
                return Err(AcademyError::InvalidInput(
                    "Either email or phone_number is required.".to_owned(),
                ));
            }
            (Some(_), _) => AuthType::ViaEmail,
            (None, Some(_)) => AuthType::ViaPhone,
        };
        if let Some(ref phone) = input.phone_number {
            if !is_phone(phone) {
                return Err(AcademyError::InvalidInput(
                    "Enter a valid phone number.".to_owned(),
                ));
            }
        }

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(AcademyError::Duplicate("username"));
        }
        if let Some(ref email) = input.email {
            if self.users.find_by_email(email).await?.is_some() {
                return Err(AcademyError::Duplicate("email"));
            }
        }
        if let Some(ref phone) = input.phone_number {
            if self.users.find_by_phone(phone).await?.is_some() {
                return Err(AcademyError::Duplicate("phone_number"));
            }
        }

        let password_hash = hash_password(&input.password)?;
        // The unique indexes still decide races between concurrent registrations.
        let user = self
            .users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                phone_number: input.phone_number,
                password_hash,
                auth_type,
            })
            .await?;

        tracing::info!(user_id = user.id, auth_type = auth_type.as_str(), "user registered");
        Ok(user.id)
    }
}
