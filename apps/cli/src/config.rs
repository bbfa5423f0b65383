use std::path::PathBuf;
use std::time::Duration;

use folio_market_data::{
    google_config, yahoo_config, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TTL, DEFAULT_USER_AGENT,
};

const DEFAULT_PORTFOLIO_PATH: &str = "data/portfolio.json";
const DEFAULT_METRICS_TTL: Duration = Duration::from_secs(30);

pub struct Config {
    pub portfolio_path: PathBuf,
    pub cache_ttl: Duration,
    pub metrics_cache_ttl: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub price_endpoint: String,
    pub metrics_endpoint: String,
    /// Re-run the pipeline on this period instead of once
    pub refresh_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let seconds = |key: &str, default: Duration| match var(key) {
            None => default,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        "Invalid {}='{}', using default of {}s",
                        key,
                        raw,
                        default.as_secs()
                    );
                    default
                }
            },
        };

        let refresh_interval = var("REFRESH_INTERVAL_SECONDS").and_then(|raw| {
            match raw.parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Invalid REFRESH_INTERVAL_SECONDS='{}', running once", raw);
                    None
                }
            }
        });

        Self {
            portfolio_path: var("PORTFOLIO_PATH")
                .unwrap_or_else(|| DEFAULT_PORTFOLIO_PATH.to_string())
                .into(),
            cache_ttl: seconds("CACHE_TTL_SECONDS", DEFAULT_TTL),
            metrics_cache_ttl: seconds("METRICS_CACHE_TTL_SECONDS", DEFAULT_METRICS_TTL),
            request_timeout: seconds("REQUEST_TIMEOUT_SECONDS", DEFAULT_REQUEST_TIMEOUT),
            user_agent: var("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            price_endpoint: var("PRICE_ENDPOINT")
                .unwrap_or_else(|| yahoo_config().endpoint_template),
            metrics_endpoint: var("METRICS_ENDPOINT")
                .unwrap_or_else(|| google_config().endpoint_template),
            refresh_interval,
        }
    }
}
