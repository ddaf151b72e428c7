use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::TokenPair;
use crate::error::AcademyError;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, RefreshUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

// ── POST /api/token/ (also /auth/login/) ─────────────────────────────────────

#[derive(Deserialize)]
pub struct ObtainTokenRequest {
    pub username: String,
    pub password: String,
}

pub async fn obtain_token(
    State(state): State<AppState>,
    Json(body): Json<ObtainTokenRequest>,
) -> Result<Json<TokenPairResponse>, AcademyError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(pair.into()))
}

// ── POST /api/token/refresh/ ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AcademyError> {
    let usecase = RefreshUseCase {
        users: state.user_repo(),
        blacklist: state.blacklist(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let access = usecase.execute(&body.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}
