use chrono::{DateTime, Utc};

use academy_domain::course::CourseLevel;
use academy_domain::user::{AuthRole, AuthStatus, AuthType};

/// Confirmation code time-to-live in seconds.
pub const CONFIRMATION_CODE_TTL_SECS: u64 = 300;

/// Confirmation code length in decimal digits.
pub const CONFIRMATION_CODE_LEN: usize = 6;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub auth_type: AuthType,
    pub auth_status: AuthStatus,
    pub auth_role: AuthRole,
    pub created_at: DateTime<Utc>,
}

/// Registration payload after validation and hashing. New users are always
/// `unconfirmed` students.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub auth_type: AuthType,
}

/// Profile fields an account owner may change. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.phone_number.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub created_by: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<CourseLevel>,
}

#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChapter {
    pub course_id: i64,
    pub title: String,
    pub order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ChapterChanges {
    pub course_id: Option<i64>,
    pub title: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: i64,
    pub chapter_id: i64,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order: i32,
    pub is_free_preview: bool,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub chapter_id: i64,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order: i32,
    pub is_free_preview: bool,
}

/// `video_url: Some(None)` clears the URL.
#[derive(Debug, Clone, Default)]
pub struct LessonChanges {
    pub chapter_id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_free_preview: Option<bool>,
}

/// Chapter with its lessons sorted by `(order, id)`.
#[derive(Debug, Clone)]
pub struct ChapterDetail {
    pub chapter: Chapter,
    pub lessons: Vec<Lesson>,
}

/// Course with its creator's username and chapters sorted by `(order, id)`.
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub created_by: String,
    pub chapters: Vec<ChapterDetail>,
}

// ── Enrollment ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
}

#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub enrollment: Enrollment,
    pub course: CourseDetail,
}
