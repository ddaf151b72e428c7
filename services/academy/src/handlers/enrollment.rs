use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use academy_auth_types::identity::Identity;

use crate::domain::types::EnrolledCourse;
use crate::error::AcademyError;
use crate::handlers::catalog::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{EnrollUseCase, ListMyCoursesUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub course: CourseResponse,
    #[serde(serialize_with = "academy_core::serde::to_rfc3339_ms")]
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

impl From<EnrolledCourse> for EnrollmentResponse {
    fn from(item: EnrolledCourse) -> Self {
        Self {
            id: item.enrollment.id,
            course: item.course.into(),
            enrolled_at: item.enrollment.enrolled_at,
        }
    }
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

// ── GET /api/enrollments/my_courses/ ─────────────────────────────────────────

pub async fn my_courses(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentResponse>>, AcademyError> {
    let usecase = ListMyCoursesUseCase {
        enrollments: state.enrollment_repo(),
        courses: state.course_repo(),
        chapters: state.chapter_repo(),
        lessons: state.lesson_repo(),
        users: state.user_repo(),
    };
    let items = usecase.execute(identity.user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

// ── POST /api/enrollments/{course_id}/enroll/ ────────────────────────────────

pub async fn enroll(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<(StatusCode, Json<DetailResponse>), AcademyError> {
    let usecase = EnrollUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
    };
    usecase.execute(identity.user_id, course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DetailResponse {
            detail: "Successfully enrolled!",
        }),
    ))
}
