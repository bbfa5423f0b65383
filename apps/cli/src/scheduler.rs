//! Periodic portfolio refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::main_lib::{print_portfolio, AppState};

/// Refresh and print the portfolio every `period` until Ctrl-C.
pub async fn run_refresh_loop(state: Arc<AppState>, period: Duration) {
    info!("Refreshing portfolio every {}s", period.as_secs());

    // First tick is immediate.
    let mut ticker = interval(period);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => run_refresh(&state).await,
            _ = &mut shutdown => {
                info!("Shutting down refresh loop");
                break;
            }
        }
    }
}

async fn run_refresh(state: &AppState) {
    if let Err(e) = print_portfolio(state).await {
        warn!("Portfolio refresh failed: {}", e);
    }
    debug!("{} cached quote record(s)", state.cache.len());
}
