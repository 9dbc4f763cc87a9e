//! Background scheduler for the subscription accrual engine.
//!
//! Runs `AccrualService::run_cycle` on a fixed interval, the moving part
//! that turns open subscriptions into daily returns and maturity payouts.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first cycle (60 seconds to let the server fully start)
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts the background accrual scheduler.
pub fn start_accrual_scheduler(state: Arc<AppState>, interval_secs: u64) {
    tokio::spawn(async move {
        info!("Accrual scheduler started ({}s interval)", interval_secs);

        // Initial delay before the first cycle
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate, subsequent ticks are interval_secs apart
        let mut accrual_interval = interval(Duration::from_secs(interval_secs));

        loop {
            accrual_interval.tick().await;
            run_scheduled_cycle(&state).await;
        }
    });
}

/// Runs a single scheduled accrual cycle.
async fn run_scheduled_cycle(state: &Arc<AppState>) {
    info!("Running scheduled accrual cycle...");

    match state.accrual_service.run_cycle().await {
        Ok(summary) => {
            info!(
                "Accrual cycle completed: {} open, {} accrued, {} matured, {} failed",
                summary.processed, summary.accrued, summary.matured, summary.failed
            );
        }
        Err(e) => {
            warn!("Accrual cycle failed: {}", e);
        }
    }
}
