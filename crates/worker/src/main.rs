//! One-shot vaccine demand sync, intended for cron.
//!
//! Syncs every state, or only `SYNC_STATE_ID` when set, then exits. Any
//! failure exits with status 1.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaxdemand_core::types::DbId;
use vaxdemand_pipeline::SyncService;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaxdemand_worker=debug,vaxdemand_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let state_id: Option<DbId> = std::env::var("SYNC_STATE_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim().parse().unwrap_or_else(|_| {
                tracing::error!(value = %v, "SYNC_STATE_ID must be a valid integer");
                std::process::exit(1);
            })
        });

    let pool = match vaxdemand_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = vaxdemand_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run database migrations");
        std::process::exit(1);
    }

    tracing::info!(state_id = ?state_id, "Worker starting vaccine demand sync");

    match SyncService::sync_scope(&pool, state_id).await {
        Ok(report) => {
            tracing::info!(
                states_synced = report.states_synced,
                reports_written = report.reports_written,
                "Worker finished"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Worker sync failed");
            pool.close().await;
            std::process::exit(1);
        }
    }

    pool.close().await;
}
