//! Fakes for driving cycles and routes without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use disclosure_core::{kst, Clock, DisclosureError, DisclosureSource, FilingRecord};
use notification_service::NotificationChannel;

pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Thursday 2024-01-18 10:00 KST.
pub fn business_hours_now() -> DateTime<FixedOffset> {
    kst().with_ymd_and_hms(2024, 1, 18, 10, 0, 0).unwrap()
}

/// Saturday 2024-01-20 10:00 KST.
pub fn weekend_now() -> DateTime<FixedOffset> {
    kst().with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap()
}

pub fn filing(id: &str, title: &str) -> FilingRecord {
    FilingRecord::new("테스트기업", title, id, "20240118 09:50")
}

pub struct FakeSource {
    result: Result<Vec<FilingRecord>, DisclosureError>,
    calls: AtomicUsize,
    lookbacks: Mutex<Vec<i64>>,
}

impl FakeSource {
    pub fn returning(filings: Vec<FilingRecord>) -> Self {
        Self {
            result: Ok(filings),
            calls: AtomicUsize::new(0),
            lookbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DisclosureError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
            lookbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn lookbacks(&self) -> Vec<i64> {
        self.lookbacks.lock().unwrap().clone()
    }
}

#[async_trait]
impl DisclosureSource for FakeSource {
    async fn fetch_recent(
        &self,
        lookback_minutes: i64,
        _now: DateTime<FixedOffset>,
    ) -> Result<Vec<FilingRecord>, DisclosureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookbacks.lock().unwrap().push(lookback_minutes);
        self.result.clone()
    }
}

pub struct RecordingChannel {
    failure: Option<DisclosureError>,
    sent: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn ok() -> Self {
        Self {
            failure: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DisclosureError) -> Self {
        Self {
            failure: Some(error),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send(&self, text: &str) -> Result<(), DisclosureError> {
        self.sent.lock().unwrap().push(text.to_string());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
