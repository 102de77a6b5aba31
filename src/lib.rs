pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub mod proctoring;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use crate::core::{config::Settings, redis::RedisHandle, state::AppState, telemetry};
use crate::services::judge::JudgeClient;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let db_pool = db::init_pool(&settings).await?;
    db::run_migrations(&db_pool).await?;

    let redis = RedisHandle::new(settings.redis().redis_url());
    if let Err(err) = redis.connect().await {
        tracing::error!(error = %err, "Failed to connect to Redis; login throttling disabled");
    } else {
        tracing::info!("Redis connected successfully");
    }

    if !settings.judge().has_credentials() {
        tracing::warn!("Judge credentials are not configured; code execution will fail");
    }
    let judge = JudgeClient::from_settings(&settings)?;
    let state = AppState::new(settings, db_pool, redis.clone(), judge);

    if let Err(err) = core::bootstrap::ensure_master(&state).await {
        tracing::error!(error = %err, "Failed to ensure master account");
    }
    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Exam portal API listening"
    );

    let result =
        axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await;

    redis.disconnect().await;
    tracing::info!("Redis disconnected");

    result?;

    Ok(())
}
