//! Scheduled recomputation of vaccine demand.
//!
//! Runs a full sync every `interval`, sequentially in one task. The first
//! run happens one interval after startup; use the refresh endpoint or the
//! worker binary for an immediate run.

use std::time::Duration;

use sqlx::PgPool;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use vaxdemand_pipeline::SyncService;

/// Run the demand sync loop until `cancel` is triggered.
///
/// A failed run is logged and retried at the next tick.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Demand sync job started");

    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Demand sync job stopping");
                break;
            }
            _ = ticker.tick() => {
                match SyncService::sync_all(&pool).await {
                    Ok(report) => {
                        tracing::info!(
                            states_synced = report.states_synced,
                            reports_written = report.reports_written,
                            "Demand sync: run complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Demand sync: run failed");
                    }
                }
            }
        }
    }
}
