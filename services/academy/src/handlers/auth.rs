use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use academy_auth_types::identity::Identity;

use crate::error::AcademyError;
use crate::handlers::token::TokenPairResponse;
use crate::state::AppState;
use crate::usecase::confirmation::{
    CodePurpose, ConfirmCodeInput, ConfirmCodeUseCase, RequestCodeUseCase,
};
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::usecase::registration::{RegisterInput, RegisterUseCase};
use crate::usecase::session::LogoutUseCase;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── POST /auth/register/ ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AcademyError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user_id = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            phone_number: body.phone_number,
            password: body.password,
        })
        .await?;
    Ok(Json(RegisterResponse { user_id }))
}

// ── POST /auth/confirm-email/, /auth/reset-password/confirm-code/ ────────────

#[derive(Deserialize)]
pub struct ConfirmCodeRequest {
    pub user_id: i64,
    pub code: String,
}

async fn confirm(
    state: AppState,
    body: ConfirmCodeRequest,
    purpose: CodePurpose,
) -> Result<Json<TokenPairResponse>, AcademyError> {
    let usecase = ConfirmCodeUseCase {
        users: state.user_repo(),
        codes: state.code_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase
        .execute(
            ConfirmCodeInput {
                user_id: body.user_id,
                code: body.code,
            },
            purpose,
        )
        .await?;
    Ok(Json(pair.into()))
}

pub async fn confirm_email(
    State(state): State<AppState>,
    Json(body): Json<ConfirmCodeRequest>,
) -> Result<Json<TokenPairResponse>, AcademyError> {
    confirm(state, body, CodePurpose::ConfirmEmail).await
}

pub async fn confirm_reset_code(
    State(state): State<AppState>,
    Json(body): Json<ConfirmCodeRequest>,
) -> Result<Json<TokenPairResponse>, AcademyError> {
    confirm(state, body, CodePurpose::ResetPassword).await
}

// ── POST /auth/reset-password/ ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub phone_or_email: String,
}

#[derive(Serialize)]
pub struct CodeSentResponse {
    pub user_id: i64,
    pub message: &'static str,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<CodeSentResponse>, AcademyError> {
    let usecase = RequestCodeUseCase {
        users: state.user_repo(),
        codes: state.code_store(),
        sender: state.code_sender(),
    };
    let user_id = usecase.execute(&body.phone_or_email).await?;
    Ok(Json(CodeSentResponse {
        user_id,
        message: "Code sent",
    }))
}

// ── POST /auth/reset-password/confirm-password/ ──────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmPasswordRequest {
    pub password_one: String,
    pub password_two: String,
}

pub async fn confirm_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ConfirmPasswordRequest>,
) -> Result<Json<MessageResponse>, AcademyError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                password_one: body.password_one,
                password_two: body.password_two,
            },
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully",
    }))
}

// ── POST /auth/logout/ ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

pub async fn logout(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<LogoutRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AcademyError> {
    let usecase = LogoutUseCase {
        blacklist: state.blacklist(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(identity.user_id, &body.refresh).await?;
    Ok((
        StatusCode::RESET_CONTENT,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    ))
}
