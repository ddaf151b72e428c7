use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};

use academy_auth_types::identity::Identity;
use academy_domain::course::CourseLevel;

use crate::domain::types::{
    ChapterChanges, ChapterDetail, CourseChanges, CourseDetail, Lesson, LessonChanges, NewChapter,
    NewLesson,
};
use crate::error::AcademyError;
use crate::infra::db::{
    DbChapterRepository, DbCourseRepository, DbLessonRepository, DbUserRepository,
};
use crate::state::AppState;
use crate::usecase::catalog::{ChapterUseCase, CourseInput, CourseUseCase, LessonUseCase};

fn parse_level(raw: &str) -> Result<CourseLevel, AcademyError> {
    raw.parse()
        .map_err(|_| AcademyError::InvalidInput(format!("level: \"{raw}\" is not a valid choice.")))
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LessonResponse {
    pub id: i64,
    pub chapter: i64,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order: i32,
    pub is_free_preview: bool,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            chapter: lesson.chapter_id,
            title: lesson.title,
            content: lesson.content,
            video_url: lesson.video_url,
            order: lesson.order,
            is_free_preview: lesson.is_free_preview,
        }
    }
}

#[derive(Serialize)]
pub struct ChapterResponse {
    pub id: i64,
    pub lessons: Vec<LessonResponse>,
    pub course: i64,
    pub title: String,
    pub order: i32,
    #[serde(serialize_with = "academy_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ChapterDetail> for ChapterResponse {
    fn from(detail: ChapterDetail) -> Self {
        let ChapterDetail { chapter, lessons } = detail;
        Self {
            id: chapter.id,
            lessons: lessons.into_iter().map(Into::into).collect(),
            course: chapter.course_id,
            title: chapter.title,
            order: chapter.order,
            created_at: chapter.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub chapters: Vec<ChapterResponse>,
    /// Creator's username.
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    #[serde(serialize_with = "academy_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CourseDetail> for CourseResponse {
    fn from(detail: CourseDetail) -> Self {
        let CourseDetail {
            course,
            created_by,
            chapters,
        } = detail;
        Self {
            id: course.id,
            chapters: chapters.into_iter().map(Into::into).collect(),
            created_by,
            title: course.title,
            description: course.description,
            level: course.level,
            created_at: course.created_at,
        }
    }
}

// ── Courses ──────────────────────────────────────────────────────────────────

type Courses =
    CourseUseCase<DbCourseRepository, DbChapterRepository, DbLessonRepository, DbUserRepository>;

fn course_usecase(state: &AppState) -> Courses {
    CourseUseCase {
        courses: state.course_repo(),
        chapters: state.chapter_repo(),
        lessons: state.lesson_repo(),
        users: state.user_repo(),
    }
}

#[derive(Deserialize, Default)]
pub struct CourseListQuery {
    pub level: Option<String>,
}

/// Full representation for create and `PUT`. A client-supplied `created_by`
/// is ignored.
#[derive(Deserialize)]
pub struct CourseRequest {
    pub title: String,
    pub description: String,
    pub level: String,
}

#[derive(Deserialize)]
pub struct CoursePatchRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
}

pub async fn list_courses(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Vec<CourseResponse>>, AcademyError> {
    let level = query.level.as_deref().map(parse_level).transpose()?;
    let courses = course_usecase(&state).list(level).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

pub async fn get_course(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseResponse>, AcademyError> {
    let course = course_usecase(&state).get(id).await?;
    Ok(Json(course.into()))
}

pub async fn create_course(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AcademyError> {
    let input = CourseInput {
        level: parse_level(&body.level)?,
        title: body.title,
        description: body.description,
    };
    let course = course_usecase(&state)
        .create(identity.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

pub async fn replace_course(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, AcademyError> {
    let changes = CourseChanges {
        level: Some(parse_level(&body.level)?),
        title: Some(body.title),
        description: Some(body.description),
    };
    let course = course_usecase(&state).update(id, changes).await?;
    Ok(Json(course.into()))
}

pub async fn patch_course(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CoursePatchRequest>,
) -> Result<Json<CourseResponse>, AcademyError> {
    let changes = CourseChanges {
        level: body.level.as_deref().map(parse_level).transpose()?,
        title: body.title,
        description: body.description,
    };
    let course = course_usecase(&state).update(id, changes).await?;
    Ok(Json(course.into()))
}

pub async fn delete_course(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AcademyError> {
    course_usecase(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Chapters ─────────────────────────────────────────────────────────────────

fn chapter_usecase(
    state: &AppState,
) -> ChapterUseCase<DbCourseRepository, DbChapterRepository, DbLessonRepository> {
    ChapterUseCase {
        courses: state.course_repo(),
        chapters: state.chapter_repo(),
        lessons: state.lesson_repo(),
    }
}

#[derive(Deserialize)]
pub struct ChapterRequest {
    pub course: i64,
    pub title: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Deserialize)]
pub struct ChapterPatchRequest {
    pub course: Option<i64>,
    pub title: Option<String>,
    pub order: Option<i32>,
}

pub async fn list_chapters(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ChapterResponse>>, AcademyError> {
    let chapters = chapter_usecase(&state).list().await?;
    Ok(Json(chapters.into_iter().map(Into::into).collect()))
}

pub async fn get_chapter(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ChapterResponse>, AcademyError> {
    let chapter = chapter_usecase(&state).get(id).await?;
    Ok(Json(chapter.into()))
}

pub async fn create_chapter(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChapterRequest>,
) -> Result<(StatusCode, Json<ChapterResponse>), AcademyError> {
    let chapter = chapter_usecase(&state)
        .create(NewChapter {
            course_id: body.course,
            title: body.title,
            order: body.order,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(chapter.into())))
}

pub async fn replace_chapter(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ChapterRequest>,
) -> Result<Json<ChapterResponse>, AcademyError> {
    let changes = ChapterChanges {
        course_id: Some(body.course),
        title: Some(body.title),
        order: Some(body.order),
    };
    let chapter = chapter_usecase(&state).update(id, changes).await?;
    Ok(Json(chapter.into()))
}

pub async fn patch_chapter(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ChapterPatchRequest>,
) -> Result<Json<ChapterResponse>, AcademyError> {
    let changes = ChapterChanges {
        course_id: body.course,
        title: body.title,
        order: body.order,
    };
    let chapter = chapter_usecase(&state).update(id, changes).await?;
    Ok(Json(chapter.into()))
}

pub async fn delete_chapter(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AcademyError> {
    chapter_usecase(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Lessons ──────────────────────────────────────────────────────────────────

fn lesson_usecase(state: &AppState) -> LessonUseCase<DbChapterRepository, DbLessonRepository> {
    LessonUseCase {
        chapters: state.chapter_repo(),
        lessons: state.lesson_repo(),
    }
}

#[derive(Deserialize)]
pub struct LessonRequest {
    pub chapter: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_free_preview: bool,
}

#[derive(Deserialize)]
pub struct LessonPatchRequest {
    pub chapter: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub video_url: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_free_preview: Option<bool>,
}

pub async fn list_lessons(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<LessonResponse>>, AcademyError> {
    let lessons = lesson_usecase(&state).list().await?;
    Ok(Json(lessons.into_iter().map(Into::into).collect()))
}

pub async fn get_lesson(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LessonResponse>, AcademyError> {
    let lesson = lesson_usecase(&state).get(id).await?;
    Ok(Json(lesson.into()))
}

pub async fn create_lesson(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<LessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), AcademyError> {
    let lesson = lesson_usecase(&state)
        .create(NewLesson {
            chapter_id: body.chapter,
            title: body.title,
            content: body.content,
            video_url: body.video_url,
            order: body.order,
            is_free_preview: body.is_free_preview,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

pub async fn replace_lesson(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<LessonRequest>,
) -> Result<Json<LessonResponse>, AcademyError> {
    let changes = LessonChanges {
        chapter_id: Some(body.chapter),
        title: Some(body.title),
        content: Some(body.content),
        video_url: Some(body.video_url),
        order: Some(body.order),
        is_free_preview: Some(body.is_free_preview),
    };
    let lesson = lesson_usecase(&state).update(id, changes).await?;
    Ok(Json(lesson.into()))
}

pub async fn patch_lesson(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<LessonPatchRequest>,
) -> Result<Json<LessonResponse>, AcademyError> {
    let changes = LessonChanges {
        chapter_id: body.chapter,
        title: body.title,
        content: body.content,
        video_url: body.video_url,
        order: body.order,
        is_free_preview: body.is_free_preview,
    };
    let lesson = lesson_usecase(&state).update(id, changes).await?;
    Ok(Json(lesson.into()))
}

pub async fn delete_lesson(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AcademyError> {
    lesson_usecase(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
