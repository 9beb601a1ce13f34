use std::sync::Arc;
use std::time::Duration;

use disclosure_core::CycleStatus;
use tokio::task::JoinHandle;
use tokio::time;

use crate::cycle::CycleOrchestrator;

/// Run a check cycle every `period`, first one immediately.
pub fn spawn(orchestrator: Arc<CycleOrchestrator>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let outcome = orchestrator.run_check_cycle().await;
            match outcome.status {
                CycleStatus::Error => {
                    tracing::error!("Scheduled cycle failed: {}", outcome.message)
                }
                _ if outcome.is_success() => {
                    tracing::info!("Scheduled cycle: {}", outcome.message)
                }
                _ => tracing::debug!("Scheduled cycle: {}", outcome.message),
            }
        }
    })
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
