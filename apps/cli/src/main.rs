mod config;
mod main_lib;
mod scheduler;

use config::Config;
use main_lib::{build_state, init_tracing, print_portfolio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();
    let state = build_state(&config)?;

    match config.refresh_interval {
        Some(period) => scheduler::run_refresh_loop(state, period).await,
        None => print_portfolio(&state).await?,
    }
    Ok(())
}
