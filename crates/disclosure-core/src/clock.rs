use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};

use crate::Clock;

/// DART publishes receipt times in Korea Standard Time without an offset.
pub const KST_OFFSET_SECONDS: i32 = 9 * 60 * 60;

/// First hour (inclusive) of the alerting window.
pub const BUSINESS_HOURS_START: u32 = 8;
/// Hour at which the alerting window closes (exclusive).
pub const BUSINESS_HOURS_END: u32 = 18;

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

pub fn kst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// Weekday between 08:00 and 17:59 KST.
pub fn is_business_hours(now: DateTime<FixedOffset>) -> bool {
    let local = now.with_timezone(&kst());

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    (BUSINESS_HOURS_START..BUSINESS_HOURS_END).contains(&local.hour())
}

/// Wall clock in KST.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        kst_now()
    }
}
