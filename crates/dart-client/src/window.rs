use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use disclosure_core::{kst, DisclosureError, FilingRecord};

/// Layout of `rcept_dt`, e.g. `20240118 16:32`.
pub const RECEIPT_TIME_FORMAT: &str = "%Y%m%d %H:%M";

/// Parse a receipt timestamp and pin it to KST.
pub fn parse_receipt_time(raw: &str) -> Result<DateTime<FixedOffset>, DisclosureError> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), RECEIPT_TIME_FORMAT)
        .map_err(|_| DisclosureError::TimestampUnparseable(raw.to_string()))?;

    kst()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DisclosureError::TimestampUnparseable(raw.to_string()))
}

/// Lookback as a duration, saturating instead of overflowing.
pub fn lookback_window(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or(Duration::MAX)
}

/// Keep records received at or after `now - lookback`.
///
/// A record whose timestamp cannot be parsed is logged and dropped; the rest
/// of the batch is still evaluated. A window reaching past the representable
/// range has no cutoff.
pub fn filter_recent(
    records: Vec<FilingRecord>,
    lookback: Duration,
    now: DateTime<FixedOffset>,
) -> Vec<FilingRecord> {
    let cutoff = now.checked_sub_signed(lookback);

    records
        .into_iter()
        .filter(|record| match parse_receipt_time(&record.rcept_dt) {
            Ok(received) => cutoff.map_or(true, |cutoff| received >= cutoff),
            Err(e) => {
                tracing::error!("Skipping filing {:?}: {}", record.rcept_no, e);
                false
            }
        })
        .collect()
}
