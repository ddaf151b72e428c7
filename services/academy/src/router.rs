use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;

use academy_core::health::healthz;
use academy_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    account::{get_account, update_account},
    auth::{
        confirm_email, confirm_password, confirm_reset_code, logout, register, reset_password,
    },
    catalog::{
        create_chapter, create_course, create_lesson, delete_chapter, delete_course,
        delete_lesson, get_chapter, get_course, get_lesson, list_chapters, list_courses,
        list_lessons, patch_chapter, patch_course, patch_lesson, replace_chapter, replace_course,
        replace_lesson,
    },
    enrollment::{enroll, my_courses},
    health::readyz,
    token::{obtain_token, refresh_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity
        .route("/auth/register/", post(register))
        .route("/auth/confirm-email/", post(confirm_email))
        .route("/auth/reset-password/", post(reset_password))
        .route("/auth/reset-password/confirm-code/", post(confirm_reset_code))
        .route(
            "/auth/reset-password/confirm-password/",
            post(confirm_password),
        )
        .route("/auth/logout/", post(logout))
        .route("/auth/login/", post(obtain_token))
        .route("/auth/account/{id}/", get(get_account))
        .route(
            "/auth/account/update/{id}/",
            put(update_account).patch(update_account),
        )
        // Token
        .route("/api/token/", post(obtain_token))
        .route("/api/token/refresh/", post(refresh_token))
        // Courses
        .route("/api/courses/", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}/",
            get(get_course)
                .put(replace_course)
                .patch(patch_course)
                .delete(delete_course),
        )
        // Chapters
        .route("/api/chapters/", get(list_chapters).post(create_chapter))
        .route(
            "/api/chapters/{id}/",
            get(get_chapter)
                .put(replace_chapter)
                .patch(patch_chapter)
                .delete(delete_chapter),
        )
        // Lessons
        .route("/api/lessons/", get(list_lessons).post(create_lesson))
        .route(
            "/api/lessons/{id}/",
            get(get_lesson)
                .put(replace_lesson)
                .patch(patch_lesson)
                .delete(delete_lesson),
        )
        // Enrollments
        .route("/api/enrollments/my_courses/", get(my_courses))
        .route("/api/enrollments/{course_id}/enroll/", post(enroll))
        .with_state(state)
        // Top to bottom is outside in: the id is set before the trace span opens.
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer()),
        )
}
