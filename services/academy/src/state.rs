use axum::extract::FromRef;
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use academy_auth_types::identity::JwtSecret;

use crate::infra::cache::{RedisConfirmationCodeStore, RedisTokenBlacklist};
use crate::infra::db::{
    DbChapterRepository, DbCourseRepository, DbEnrollmentRepository, DbLessonRepository,
    DbUserRepository,
};
use crate::infra::notify::Dispatcher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub dispatcher: Dispatcher,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn chapter_repo(&self) -> DbChapterRepository {
        DbChapterRepository {
            db: self.db.clone(),
        }
    }

    pub fn lesson_repo(&self) -> DbLessonRepository {
        DbLessonRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_store(&self) -> RedisConfirmationCodeStore {
        RedisConfirmationCodeStore {
            pool: self.redis.clone(),
        }
    }

    pub fn blacklist(&self) -> RedisTokenBlacklist {
        RedisTokenBlacklist {
            pool: self.redis.clone(),
        }
    }

    pub fn code_sender(&self) -> Dispatcher {
        self.dispatcher.clone()
    }
}
