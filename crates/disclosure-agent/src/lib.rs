//! DART disclosure alert agent.
//!
//! Each trigger runs one check cycle: business-hours gate, fetch of today's
//! filings within the lookback window, dedup against what this process has
//! already delivered, then one formatted Telegram message. Triggers arrive
//! over HTTP (an external scheduler hitting `/cron/check-disclosures`) or from
//! the optional built-in interval.

pub mod config;
pub mod cycle;
pub mod dedup;
pub mod routes;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use anyhow::Result;
use dart_client::DartClient;
use disclosure_core::{Clock, DisclosureSource, SystemClock};
use notification_service::{NotificationChannel, TelegramNotifier};

pub use config::AgentConfig;
pub use cycle::CycleOrchestrator;
pub use dedup::DedupStore;

/// Wire the production components and serve until Ctrl-C / SIGTERM.
pub async fn run_server(config: AgentConfig) -> Result<()> {
    let source: Arc<dyn DisclosureSource> = Arc::new(DartClient::with_base_url(
        config.dart_api_key.clone(),
        config.dart_api_base.clone(),
    ));
    let channel: Arc<dyn NotificationChannel> =
        Arc::new(TelegramNotifier::new(&config.notification));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let dedup = Arc::new(DedupStore::new());

    let orchestrator = Arc::new(
        CycleOrchestrator::new(Arc::clone(&source), Arc::clone(&channel), dedup)
            .with_clock(Arc::clone(&clock))
            .with_lookback_minutes(config.lookback_minutes),
    );

    let scheduler = if config.check_interval_seconds > 0 {
        tracing::info!(
            "Built-in scheduler enabled: every {}s",
            config.check_interval_seconds
        );
        Some(scheduler::spawn(
            Arc::clone(&orchestrator),
            std::time::Duration::from_secs(config.check_interval_seconds),
        ))
    } else {
        tracing::info!("Built-in scheduler disabled; waiting for external triggers");
        None
    };

    let app = routes::router(routes::AppState {
        orchestrator,
        source,
        channel,
        clock,
        secrets: config.secret_status(),
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(scheduler::shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }

    tracing::info!("Disclosure agent shut down.");
    Ok(())
}
