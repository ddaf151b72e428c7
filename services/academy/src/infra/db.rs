use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel as _, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, OnConflict},
};

use academy_domain::course::CourseLevel;
use academy_domain::user::{AuthRole, AuthStatus, AuthType};
use academy_schema::{chapters, courses, enrollments, lessons, users};

use crate::domain::repository::{
    ChapterRepository, CourseRepository, EnrollmentRepository, LessonRepository, UserRepository,
};
use crate::domain::types::{
    Chapter, ChapterChanges, Course, CourseChanges, EnrollOutcome, Enrollment, Lesson,
    LessonChanges, NewChapter, NewCourse, NewLesson, NewUser, ProfileChanges, User,
};
use crate::error::AcademyError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

/// Unique-index violations become `Duplicate(<field>)`; Postgres names the
/// constraint `users_<column>_key`.
fn user_write_error(e: DbErr, context: &'static str) -> AcademyError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() {
        let field = if message.contains("phone_number") {
            "phone_number"
        } else if message.contains("email") {
            "email"
        } else {
            "username"
        };
        return AcademyError::Duplicate(field);
    }
    if matches!(e, DbErr::RecordNotUpdated) {
        return AcademyError::UserNotFound;
    }
    AcademyError::Internal(anyhow::Error::new(e).context(context))
}

impl DbUserRepository {
    async fn find_one(
        &self,
        column: users::Column,
        value: &str,
        context: &'static str,
    ) -> Result<Option<User>, AcademyError> {
        let model = users::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .context(context)?;
        model.map(user_from_model).transpose()
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AcademyError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AcademyError> {
        self.find_one(users::Column::Username, username, "find user by username")
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AcademyError> {
        self.find_one(users::Column::Email, email, "find user by email")
            .await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AcademyError> {
        self.find_one(users::Column::PhoneNumber, phone, "find user by phone")
            .await
    }

    async fn usernames(&self, ids: &[i64]) -> Result<HashMap<i64, String>, AcademyError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i64, String)> = users::Entity::find()
            .select_only()
            .columns([users::Column::Id, users::Column::Username])
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("load usernames")?;
        Ok(rows.into_iter().collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AcademyError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            password_hash: Set(user.password_hash.clone()),
            auth_type: Set(user.auth_type.as_str().to_owned()),
            auth_status: Set(AuthStatus::Unconfirmed.as_str().to_owned()),
            auth_role: Set(AuthRole::default().as_str().to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| user_write_error(e, "create user"))?;
        user_from_model(model)
    }

    async fn mark_confirmed(&self, id: i64) -> Result<(), AcademyError> {
        users::Entity::update_many()
            .col_expr(
                users::Column::AuthStatus,
                Expr::value(AuthStatus::Confirmed.as_str()),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("mark user confirmed")?;
        Ok(())
    }

    async fn set_password_hash(&self, id: i64, hash: &str) -> Result<(), AcademyError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(hash))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set password hash")?;
        if result.rows_affected == 0 {
            return Err(AcademyError::UserNotFound);
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<User, AcademyError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref username) = changes.username {
            am.username = Set(username.clone());
        }
        if let Some(ref email) = changes.email {
            am.email = Set(Some(email.clone()));
        }
        if let Some(ref phone) = changes.phone_number {
            am.phone_number = Set(Some(phone.clone()));
        }
        let model = am
            .update(&self.db)
            .await
            .map_err(|e| user_write_error(e, "update user profile"))?;
        user_from_model(model)
    }
}

fn user_from_model(model: users::Model) -> Result<User, AcademyError> {
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        phone_number: model.phone_number,
        password_hash: model.password_hash,
        auth_type: model.auth_type.parse::<AuthType>().context("stored auth_type")?,
        auth_status: model.auth_status.parse::<AuthStatus>().context("stored auth_status")?,
        auth_role: model.auth_role.parse::<AuthRole>().context("stored auth_role")?,
        created_at: model.created_at,
    })
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, level: Option<CourseLevel>) -> Result<Vec<Course>, AcademyError> {
        let mut query = courses::Entity::find();
        if let Some(level) = level {
            query = query.filter(courses::Column::Level.eq(level.as_str()));
        }
        let models = query
            .order_by_asc(courses::Column::Id)
            .all(&self.db)
            .await
            .context("list courses")?;
        models.into_iter().map(course_from_model).collect()
    }

    async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>, AcademyError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = courses::Entity::find()
            .filter(courses::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(courses::Column::Id)
            .all(&self.db)
            .await
            .context("list courses by ids")?;
        models.into_iter().map(course_from_model).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AcademyError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        model.map(course_from_model).transpose()
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, AcademyError> {
        let model = courses::ActiveModel {
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            level: Set(course.level.as_str().to_owned()),
            created_by: Set(course.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create course")?;
        course_from_model(model)
    }

    async fn update(
        &self,
        id: i64,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, AcademyError> {
        let Some(model) = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref description) = changes.description {
            am.description = Set(description.clone());
        }
        if let Some(level) = changes.level {
            am.level = Set(level.as_str().to_owned());
        }
        let model = am.update(&self.db).await.context("update course")?;
        course_from_model(model).map(Some)
    }

    async fn delete(&self, id: i64) -> Result<bool, AcademyError> {
        let result = courses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete course")?;
        Ok(result.rows_affected > 0)
    }
}

fn course_from_model(model: courses::Model) -> Result<Course, AcademyError> {
    Ok(Course {
        id: model.id,
        title: model.title,
        description: model.description,
        level: model.level.parse::<CourseLevel>().context("stored course level")?,
        created_by: model.created_by,
        created_at: model.created_at,
    })
}

// ── Chapter repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbChapterRepository {
    pub db: DatabaseConnection,
}

impl ChapterRepository for DbChapterRepository {
    async fn list(&self) -> Result<Vec<Chapter>, AcademyError> {
        let models = chapters::Entity::find()
            .order_by_asc(chapters::Column::Id)
            .all(&self.db)
            .await
            .context("list chapters")?;
        Ok(models.into_iter().map(chapter_from_model).collect())
    }

    async fn list_by_courses(&self, course_ids: &[i64]) -> Result<Vec<Chapter>, AcademyError> {
        if course_ids.is_empty() {
            return Ok(vec![]);
        }
        let models = chapters::Entity::find()
            .filter(chapters::Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(chapters::Column::Order)
            .order_by_asc(chapters::Column::Id)
            .all(&self.db)
            .await
            .context("list chapters by courses")?;
        Ok(models.into_iter().map(chapter_from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Chapter>, AcademyError> {
        let model = chapters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find chapter by id")?;
        Ok(model.map(chapter_from_model))
    }

    async fn create(&self, chapter: &NewChapter) -> Result<Chapter, AcademyError> {
        let model = chapters::ActiveModel {
            course_id: Set(chapter.course_id),
            title: Set(chapter.title.clone()),
            order: Set(chapter.order),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create chapter")?;
        Ok(chapter_from_model(model))
    }

    async fn update(
        &self,
        id: i64,
        changes: &ChapterChanges,
    ) -> Result<Option<Chapter>, AcademyError> {
        let Some(model) = chapters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find chapter for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(course_id) = changes.course_id {
            am.course_id = Set(course_id);
        }
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(order) = changes.order {
            am.order = Set(order);
        }
        let model = am.update(&self.db).await.context("update chapter")?;
        Ok(Some(chapter_from_model(model)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AcademyError> {
        let result = chapters::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete chapter")?;
        Ok(result.rows_affected > 0)
    }
}

fn chapter_from_model(model: chapters::Model) -> Chapter {
    Chapter {
        id: model.id,
        course_id: model.course_id,
        title: model.title,
        order: model.order,
        created_at: model.created_at,
    }
}

// ── Lesson repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLessonRepository {
    pub db: DatabaseConnection,
}

impl LessonRepository for DbLessonRepository {
    async fn list(&self) -> Result<Vec<Lesson>, AcademyError> {
        let models = lessons::Entity::find()
            .order_by_asc(lessons::Column::Id)
            .all(&self.db)
            .await
            .context("list lessons")?;
        Ok(models.into_iter().map(lesson_from_model).collect())
    }

    async fn list_by_chapters(&self, chapter_ids: &[i64]) -> Result<Vec<Lesson>, AcademyError> {
        if chapter_ids.is_empty() {
            return Ok(vec![]);
        }
        let models = lessons::Entity::find()
            .filter(lessons::Column::ChapterId.is_in(chapter_ids.iter().copied()))
            .order_by_asc(lessons::Column::Order)
            .order_by_asc(lessons::Column::Id)
            .all(&self.db)
            .await
            .context("list lessons by chapters")?;
        Ok(models.into_iter().map(lesson_from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Lesson>, AcademyError> {
        let model = lessons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find lesson by id")?;
        Ok(model.map(lesson_from_model))
    }

    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, AcademyError> {
        let model = lessons::ActiveModel {
            chapter_id: Set(lesson.chapter_id),
            title: Set(lesson.title.clone()),
            content: Set(lesson.content.clone()),
            video_url: Set(lesson.video_url.clone()),
            order: Set(lesson.order),
            is_free_preview: Set(lesson.is_free_preview),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create lesson")?;
        Ok(lesson_from_model(model))
    }

    async fn update(
        &self,
        id: i64,
        changes: &LessonChanges,
    ) -> Result<Option<Lesson>, AcademyError> {
        let Some(model) = lessons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find lesson for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(chapter_id) = changes.chapter_id {
            am.chapter_id = Set(chapter_id);
        }
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref content) = changes.content {
            am.content = Set(content.clone());
        }
        if let Some(ref video_url) = changes.video_url {
            am.video_url = Set(video_url.clone());
        }
        if let Some(order) = changes.order {
            am.order = Set(order);
        }
        if let Some(is_free_preview) = changes.is_free_preview {
            am.is_free_preview = Set(is_free_preview);
        }
        let model = am.update(&self.db).await.context("update lesson")?;
        Ok(Some(lesson_from_model(model)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AcademyError> {
        let result = lessons::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete lesson")?;
        Ok(result.rows_affected > 0)
    }
}

fn lesson_from_model(model: lessons::Model) -> Lesson {
    Lesson {
        id: model.id,
        chapter_id: model.chapter_id,
        title: model.title,
        content: model.content,
        video_url: model.video_url,
        order: model.order,
        is_free_preview: model.is_free_preview,
    }
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn enroll(&self, user_id: i64, course_id: i64) -> Result<EnrollOutcome, AcademyError> {
        let am = enrollments::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            enrolled_at: Set(Utc::now()),
            ..Default::default()
        };
        // The (user_id, course_id) unique index serializes concurrent enrolls;
        // the loser inserts zero rows instead of failing.
        let inserted = enrollments::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([enrollments::Column::UserId, enrollments::Column::CourseId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert enrollment")?;
        Ok(if inserted == 0 {
            EnrollOutcome::AlreadyEnrolled
        } else {
            EnrollOutcome::Enrolled
        })
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>, AcademyError> {
        let models = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .order_by_asc(enrollments::Column::EnrolledAt)
            .order_by_asc(enrollments::Column::Id)
            .all(&self.db)
            .await
            .context("list enrollments by user")?;
        Ok(models
            .into_iter()
            .map(|m| Enrollment {
                id: m.id,
                user_id: m.user_id,
                course_id: m.course_id,
                enrolled_at: m.enrolled_at,
            })
            .collect())
    }
}
