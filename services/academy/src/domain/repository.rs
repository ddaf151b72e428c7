#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use academy_domain::course::CourseLevel;

use crate::domain::types::{
    Chapter, ChapterChanges, Course, CourseChanges, EnrollOutcome, Enrollment, Lesson,
    LessonChanges, NewChapter, NewCourse, NewLesson, NewUser, ProfileChanges, User,
};
use crate::error::AcademyError;

/// Repository for user accounts.
///
/// Writes that hit a unique index fail with [`AcademyError::Duplicate`] naming the field.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AcademyError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AcademyError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AcademyError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AcademyError>;

    /// Usernames keyed by id; unknown ids are absent from the map.
    async fn usernames(&self, ids: &[i64]) -> Result<HashMap<i64, String>, AcademyError>;

    async fn create(&self, user: &NewUser) -> Result<User, AcademyError>;

    /// Mark the account `confirmed`. Idempotent.
    async fn mark_confirmed(&self, id: i64) -> Result<(), AcademyError>;

    async fn set_password_hash(&self, id: i64, hash: &str) -> Result<(), AcademyError>;

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<User, AcademyError>;
}

/// Short-lived store of the latest confirmation code per user.
pub trait ConfirmationCodeStore: Send + Sync {
    /// Store `code` for `user_id`, replacing any pending code, expiring after `ttl_secs`.
    async fn put(&self, user_id: i64, code: &str, ttl_secs: u64) -> Result<(), AcademyError>;

    /// The pending code for `user_id`, if one has not yet expired.
    async fn get(&self, user_id: i64) -> Result<Option<String>, AcademyError>;
}

/// Revoked refresh tokens, keyed by `jti`.
pub trait TokenBlacklist: Send + Sync {
    /// Revoke `jti` for `ttl_secs`. Returns `false` if it was already revoked.
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<bool, AcademyError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, AcademyError>;
}

/// Outbound delivery of confirmation codes.
pub trait CodeSender: Send + Sync {
    async fn send_email(&self, to: &str, code: &str) -> Result<(), AcademyError>;
    async fn send_sms(&self, to: &str, code: &str) -> Result<(), AcademyError>;
}

pub trait CourseRepository: Send + Sync {
    async fn list(&self, level: Option<CourseLevel>) -> Result<Vec<Course>, AcademyError>;
    async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>, AcademyError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AcademyError>;
    async fn create(&self, course: &NewCourse) -> Result<Course, AcademyError>;

    /// Returns `None` if the course does not exist.
    async fn update(
        &self,
        id: i64,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, AcademyError>;

    /// Delete with its chapters, lessons and enrollments. Returns `false` if not found.
    async fn delete(&self, id: i64) -> Result<bool, AcademyError>;
}

pub trait ChapterRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Chapter>, AcademyError>;
    async fn list_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Chapter>, AcademyError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Chapter>, AcademyError>;
    async fn create(&self, chapter: &NewChapter) -> Result<Chapter, AcademyError>;
    async fn update(
        &self,
        id: i64,
        changes: &ChapterChanges,
    ) -> Result<Option<Chapter>, AcademyError>;
    async fn delete(&self, id: i64) -> Result<bool, AcademyError>;
}

pub trait LessonRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Lesson>, AcademyError>;
    async fn list_by_chapters(&self, chapter_ids: &[i64]) -> Result<Vec<Lesson>, AcademyError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Lesson>, AcademyError>;
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, AcademyError>;
    async fn update(
        &self,
        id: i64,
        changes: &LessonChanges,
    ) -> Result<Option<Lesson>, AcademyError>;
    async fn delete(&self, id: i64) -> Result<bool, AcademyError>;
}

pub trait EnrollmentRepository: Send + Sync {
    /// Insert `(user_id, course_id)` unless it already exists. Safe under concurrent calls.
    async fn enroll(&self, user_id: i64, course_id: i64) -> Result<EnrollOutcome, AcademyError>;

    /// The user's enrollments, oldest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>, AcademyError>;
}
