use axum::{extract::State, http::StatusCode};
use deadpool_redis::redis;

use crate::state::AppState;

/// Handler for `GET /readyz`: both PostgreSQL and Redis answer a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    if let Err(e) = state.db.ping().await {
        tracing::warn!(error = %e, "readiness: database unavailable");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    let redis_ok = match state.redis.get().await {
        Ok(mut conn) => redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| tracing::warn!(error = %e, "readiness: redis ping failed"))
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness: redis pool unavailable");
            false
        }
    };
    if redis_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
