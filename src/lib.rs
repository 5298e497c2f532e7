pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::bootstrap::{self, SeedOutcome};
use crate::core::{config::Settings, redis::RedisHandle, state::AppState, telemetry};
use crate::repositories::store::PgStore;
use crate::services::ai_client::OpenAiClient;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let db_pool = db::init_pool(&settings).await?;
    db::run_migrations(&db_pool).await?;

    let redis = RedisHandle::new(settings.redis().redis_url());
    if settings.redis().enabled {
        if let Err(err) = redis.connect().await {
            tracing::error!(error = %err, "Failed to connect to Redis; AI rate limits are off");
        } else {
            tracing::info!("Redis connected successfully");
        }
    }

    let generator = OpenAiClient::from_settings(&settings)?;
    let store = PgStore::new(db_pool);
    let state = AppState::new(settings, Arc::new(store), Arc::new(generator), redis.clone());

    if state.settings().bootstrap().seed_demo_data {
        match bootstrap::seed_demo_data(state.store()).await {
            Ok(SeedOutcome::Seeded { students, grades }) => {
                tracing::info!(students, grades, "Demo data loaded");
            }
            Ok(SeedOutcome::Skipped) => {}
            Err(err) => tracing::error!(error = %err, "Failed to seed demo data"),
        }
    }

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Sahayak API listening"
    );

    let result =
        axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await;

    redis.disconnect().await;
    tracing::info!("Redis disconnected");

    result?;

    Ok(())
}
