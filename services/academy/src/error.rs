use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Academy service error variants.
///
/// Identity flows report their message under `error`; token, catalog and
/// enrollment flows use `detail`.
#[derive(Debug, thiserror::Error)]
pub enum AcademyError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid email or phone")]
    InvalidContact,
    #[error("Invalid or expired code")]
    InvalidCode,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid input")]
    Validation(#[from] validator::ValidationErrors),
    #[error("A user with this {0} already exists.")]
    Duplicate(&'static str),
    #[error("Token is invalid or expired")]
    InvalidToken,
    #[error("Token is blacklisted")]
    TokenBlacklisted,
    #[error("No active account found with the given credentials")]
    InvalidCredentials,
    #[error("Token is invalid or expired")]
    InvalidRefreshToken,
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    #[error("Course not found.")]
    CourseNotFound,
    #[error("Chapter not found.")]
    ChapterNotFound,
    #[error("Lesson not found.")]
    LessonNotFound,
    #[error("Already enrolled.")]
    AlreadyEnrolled,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AcademyError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidContact => "INVALID_CONTACT",
            Self::InvalidCode => "INVALID_CODE",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Duplicate(_) => "DUPLICATE",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenBlacklisted => "TOKEN_BLACKLISTED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::ChapterNotFound => "CHAPTER_NOT_FOUND",
            Self::LessonNotFound => "LESSON_NOT_FOUND",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// JSON field carrying the message.
    fn message_field(&self) -> &'static str {
        match self {
            Self::InvalidCredentials
            | Self::InvalidRefreshToken
            | Self::Forbidden
            | Self::CourseNotFound
            | Self::ChapterNotFound
            | Self::LessonNotFound
            | Self::AlreadyEnrolled => "detail",
            _ => "error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::CourseNotFound
            | Self::ChapterNotFound
            | Self::LessonNotFound => StatusCode::NOT_FOUND,
            Self::InvalidContact
            | Self::InvalidCode
            | Self::PasswordMismatch
            | Self::InvalidInput(_)
            | Self::Validation(_)
            | Self::Duplicate(_)
            | Self::InvalidToken
            | Self::TokenBlacklisted
            | Self::AlreadyEnrolled => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AcademyError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records every status; only 500s need the anyhow chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({ "kind": self.kind() });
        body[self.message_field()] = serde_json::Value::String(self.to_string());
        if let Self::Validation(ref errors) = self {
            body["fields"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
