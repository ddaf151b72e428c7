//! One confirmation-code mechanism serves both account confirmation and
//! password-reset authorization.

use rand::RngExt;

use academy_domain::contact::{Contact, classify};

use crate::domain::repository::{CodeSender, ConfirmationCodeStore, UserRepository};
use crate::domain::types::{
    CONFIRMATION_CODE_LEN, CONFIRMATION_CODE_TTL_SECS, TokenPair, User,
};
use crate::error::AcademyError;
use crate::usecase::token::issue_token_pair;

const DIGITS: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

// ── RequestCode ──────────────────────────────────────────────────────────────

pub struct RequestCodeUseCase<U: UserRepository, S: ConfirmationCodeStore, D: CodeSender> {
    pub users: U,
    pub codes: S,
    pub sender: D,
}

impl<U, S, D> RequestCodeUseCase<U, S, D>
where
    U: UserRepository,
    S: ConfirmationCodeStore,
    D: CodeSender,
{
    /// Issue a fresh code for the account behind `phone_or_email` and deliver it
    /// over the matching channel. Any pending code for that user is replaced.
    pub async fn execute(&self, phone_or_email: &str) -> Result<i64, AcademyError> {
        let contact = classify(phone_or_email);
        let user = match &contact {
            Contact::Email(email) => self.users.find_by_email(email).await?,
            Contact::Phone(phone) => self.users.find_by_phone(phone).await?,
            Contact::Invalid => return Err(AcademyError::InvalidContact),
        }
        .ok_or(AcademyError::UserNotFound)?;

        let code = generate_code();
        self.codes
            .put(user.id, &code, CONFIRMATION_CODE_TTL_SECS)
            .await?;

        match contact {
            Contact::Email(email) => self.sender.send_email(&email, &code).await?,
            Contact::Phone(phone) => self.sender.send_sms(&phone, &code).await?,
            Contact::Invalid => {}
        }

        tracing::info!(user_id = user.id, "confirmation code issued");
        Ok(user.id)
    }
}

// ── ConfirmCode ──────────────────────────────────────────────────────────────

/// What a successful code check unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    /// Marks the account `confirmed`.
    ConfirmEmail,
    /// Proves possession only; the returned tokens authorize a password change.
    ResetPassword,
}

pub struct ConfirmCodeInput {
    pub user_id: i64,
    pub code: String,
}

pub struct ConfirmCodeUseCase<U: UserRepository, S: ConfirmationCodeStore> {
    pub users: U,
    pub codes: S,
    pub jwt_secret: String,
}

impl<U: UserRepository, S: ConfirmationCodeStore> ConfirmCodeUseCase<U, S> {
    /// The code is left in place; it stays valid until it expires or is replaced.
    pub async fn execute(
        &self,
        input: ConfirmCodeInput,
        purpose: CodePurpose,
    ) -> Result<TokenPair, AcademyError> {
        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(AcademyError::UserNotFound)?;

        self.verify(&user, &input.code).await?;

        if purpose == CodePurpose::ConfirmEmail {
            self.users.mark_confirmed(user.id).await?;
            tracing::info!(user_id = user.id, "account confirmed");
        }

        issue_token_pair(&user, &self.jwt_secret)
    }

    async fn verify(&self, user: &User, code: &str) -> Result<(), AcademyError> {
        match self.codes.get(user.id).await? {
            Some(stored) if stored == code => Ok(()),
            _ => Err(AcademyError::InvalidCode),
        }
    }
}
