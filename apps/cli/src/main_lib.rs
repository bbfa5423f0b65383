use std::sync::Arc;

use folio_core::{
    EnrichmentService, JsonFileHoldingSource, PortfolioService, PortfolioServiceTrait,
};
use folio_market_data::{
    google_config, google_source, spawn_sweeper, yahoo_config, yahoo_source, DocumentFetcher,
    HttpFetcher, QuoteCache, QuoteProvider,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub cache: Arc<QuoteCache>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Wire the cache, quote sources and services. Must run inside the runtime.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let cache = Arc::new(QuoteCache::new(config.cache_ttl));
    spawn_sweeper(cache.clone(), cache.sweep_period());

    let fetcher: Arc<dyn DocumentFetcher> = Arc::new(HttpFetcher::new(config.request_timeout)?);

    let price_source = yahoo_source(
        yahoo_config()
            .with_endpoint(config.price_endpoint.clone())
            .with_timeout(config.request_timeout)
            .with_user_agent(config.user_agent.clone()),
        cache.clone(),
        fetcher.clone(),
    );
    let metrics_source = google_source(
        google_config()
            .with_endpoint(config.metrics_endpoint.clone())
            .with_ttl(config.metrics_cache_ttl)
            .with_timeout(config.request_timeout)
            .with_user_agent(config.user_agent.clone()),
        cache.clone(),
        fetcher,
    );
    let providers: Vec<Arc<dyn QuoteProvider>> =
        vec![Arc::new(price_source), Arc::new(metrics_source)];

    let holding_source = Arc::new(JsonFileHoldingSource::new(config.portfolio_path.clone()));
    let enrichment_service = Arc::new(EnrichmentService::new(providers));
    let portfolio_service = Arc::new(PortfolioService::new(holding_source, enrichment_service));

    tracing::info!(
        "Portfolio: {} (quote TTL {}s, metrics TTL {}s, timeout {}s)",
        config.portfolio_path.display(),
        config.cache_ttl.as_secs(),
        config.metrics_cache_ttl.as_secs(),
        config.request_timeout.as_secs()
    );

    Ok(Arc::new(AppState {
        cache,
        portfolio_service,
    }))
}

/// Run the pipeline once and write the view to stdout as JSON.
pub async fn print_portfolio(state: &AppState) -> anyhow::Result<()> {
    let view = state.portfolio_service.get_portfolio_view().await?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
