use sea_orm::Database;
use tracing::info;

use academy::config::AcademyConfig;
use academy::infra::notify::Dispatcher;
use academy::router::build_router;
use academy::state::AppState;
use academy_core::config::Config;
use academy_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AcademyConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let dispatcher = Dispatcher::from_config(&config).expect("invalid code dispatch configuration");

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        dispatcher,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.academy_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("academy service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
