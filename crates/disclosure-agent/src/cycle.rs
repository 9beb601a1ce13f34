use std::sync::Arc;

use chrono::Timelike;
use disclosure_core::{
    is_business_hours, Clock, CycleOutcome, CycleStage, DisclosureSource, SystemClock,
};
use notification_service::{AlertTemplate, NotificationBatch, NotificationChannel};

use crate::dedup::DedupStore;

pub const DEFAULT_LOOKBACK_MINUTES: i64 = 30;

/// Runs one fetch → dedup → format → send pass per trigger.
pub struct CycleOrchestrator {
    source: Arc<dyn DisclosureSource>,
    channel: Arc<dyn NotificationChannel>,
    dedup: Arc<DedupStore>,
    clock: Arc<dyn Clock>,
    lookback_minutes: i64,
}

impl CycleOrchestrator {
    pub fn new(
        source: Arc<dyn DisclosureSource>,
        channel: Arc<dyn NotificationChannel>,
        dedup: Arc<DedupStore>,
    ) -> Self {
        Self {
            source,
            channel,
            dedup,
            clock: Arc::new(SystemClock),
            lookback_minutes: DEFAULT_LOOKBACK_MINUTES,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_lookback_minutes(mut self, minutes: i64) -> Self {
        self.lookback_minutes = minutes;
        self
    }

    pub async fn run_check_cycle(&self) -> CycleOutcome {
        let now = self.clock.now();

        if !is_business_hours(now) {
            tracing::info!(
                "Outside business hours ({} {:02}:{:02}), skipping",
                now.format("%A"),
                now.hour(),
                now.minute()
            );
            return CycleOutcome::skip("outside business hours");
        }

        let filings = match self.source.fetch_recent(self.lookback_minutes, now).await {
            Ok(filings) => filings,
            Err(e) => return CycleOutcome::error(e.to_string()),
        };

        if filings.is_empty() {
            tracing::info!("No new disclosures");
            return CycleOutcome::success(CycleStage::NoNewItems, "no new disclosures");
        }

        let fresh = self.dedup.retain_unseen(filings);
        if fresh.is_empty() {
            tracing::info!("All disclosures were already delivered");
            return CycleOutcome::success(CycleStage::AllDuplicates, "duplicate disclosures");
        }

        let batch = NotificationBatch::from_filings(fresh);
        let Some(text) = AlertTemplate::render_batch(&batch, now) else {
            return CycleOutcome::success(CycleStage::NoNewItems, "no new disclosures");
        };

        match self.channel.send(&text).await {
            Ok(()) => {
                tracing::info!(
                    "Delivered {} disclosures via {}",
                    batch.len(),
                    self.channel.name()
                );
                CycleOutcome::success(
                    CycleStage::Delivered,
                    format!("delivered {} disclosures", batch.len()),
                )
            }
            Err(e) => {
                tracing::error!("Delivery via {} failed: {}", self.channel.name(), e);
                CycleOutcome::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod cycle_tests;
