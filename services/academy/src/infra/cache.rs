use deadpool_redis::Pool;
use deadpool_redis::redis::{self, AsyncCommands, RedisError};

use crate::domain::repository::{ConfirmationCodeStore, TokenBlacklist};
use crate::error::AcademyError;

fn code_key(user_id: i64) -> String {
    format!("confirmation_code:{user_id}")
}

fn blacklist_key(jti: &str) -> String {
    format!("blacklist:{jti}")
}

async fn connection(pool: &Pool) -> Result<deadpool_redis::Connection, AcademyError> {
    pool.get()
        .await
        .map_err(|e| AcademyError::Internal(anyhow::Error::new(e).context("redis pool")))
}

fn redis_error(context: &'static str) -> impl FnOnce(RedisError) -> AcademyError {
    move |e| AcademyError::Internal(anyhow::Error::new(e).context(context))
}

// ── Confirmation codes ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RedisConfirmationCodeStore {
    pub pool: Pool,
}

impl ConfirmationCodeStore for RedisConfirmationCodeStore {
    async fn put(&self, user_id: i64, code: &str, ttl_secs: u64) -> Result<(), AcademyError> {
        let mut conn = connection(&self.pool).await?;
        let (): () = conn
            .set_ex(code_key(user_id), code, ttl_secs)
            .await
            .map_err(redis_error("store confirmation code"))?;
        Ok(())
    }

    async fn get(&self, user_id: i64) -> Result<Option<String>, AcademyError> {
        let mut conn = connection(&self.pool).await?;
        let code: Option<String> = conn
            .get(code_key(user_id))
            .await
            .map_err(redis_error("load confirmation code"))?;
        Ok(code)
    }
}

// ── Refresh-token blacklist ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct RedisTokenBlacklist {
    pub pool: Pool,
}

impl TokenBlacklist for RedisTokenBlacklist {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<bool, AcademyError> {
        let mut conn = connection(&self.pool).await?;
        // SET NX replies nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(blacklist_key(jti))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(redis_error("blacklist refresh token"))?;
        Ok(reply.is_some())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AcademyError> {
        let mut conn = connection(&self.pool).await?;
        let exists: bool = conn
            .exists(blacklist_key(jti))
            .await
            .map_err(redis_error("check refresh token blacklist"))?;
        Ok(exists)
    }
}
