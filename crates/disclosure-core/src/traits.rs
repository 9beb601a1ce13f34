use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::{DisclosureError, FilingRecord};

/// Source of recently received filings.
///
/// Transport and upstream-status failures resolve to an empty list; only
/// configuration problems come back as `Err`.
#[async_trait]
pub trait DisclosureSource: Send + Sync {
    async fn fetch_recent(
        &self,
        lookback_minutes: i64,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<FilingRecord>, DisclosureError>;
}

/// Injectable time source so cycles can be driven at a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}
