use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use academy_auth_types::identity::Identity;
use academy_domain::user::{AuthRole, AuthStatus, AuthType};

use crate::domain::types::User;
use crate::error::AcademyError;
use crate::state::AppState;
use crate::usecase::account::{GetAccountUseCase, UpdateAccountInput, UpdateAccountUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub auth_type: AuthType,
    pub auth_status: AuthStatus,
    pub auth_role: AuthRole,
    #[serde(serialize_with = "academy_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            auth_type: user.auth_type,
            auth_status: user.auth_status,
            auth_role: user.auth_role,
            created_at: user.created_at,
        }
    }
}

// ── GET /auth/account/{id}/ ──────────────────────────────────────────────────

pub async fn get_account(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, AcademyError> {
    let usecase = GetAccountUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}

// ── PUT|PATCH /auth/account/update/{id}/ ─────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

pub async fn update_account(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, AcademyError> {
    let usecase = UpdateAccountUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity,
            id,
            UpdateAccountInput {
                username: body.username,
                email: body.email,
                phone_number: body.phone_number,
            },
        )
        .await?;
    Ok(Json(user.into()))
}
