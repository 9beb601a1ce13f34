pub mod window;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use disclosure_core::{DisclosureError, DisclosureSource, FilingRecord};
use reqwest::Client;
use serde::Deserialize;

pub use window::{filter_recent, lookback_window, parse_receipt_time, RECEIPT_TIME_FORMAT};

pub const DEFAULT_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// Bound applied to every request against the disclosure API.
pub const OUTBOUND_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Only the first page is requested. A day with more than this many filings
/// loses everything past the first page.
pub const PAGE_SIZE: u32 = 100;

const SUCCESS_STATUS: &str = "000";

#[derive(Clone)]
pub struct DartClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl DartClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch the first page of filings received on the KST calendar date of `now`.
    pub async fn list_today(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<FilingRecord>, DisclosureError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DisclosureError::ConfigMissing("DART_API_KEY".to_string()))?;

        let today = now
            .with_timezone(&disclosure_core::kst())
            .format("%Y%m%d")
            .to_string();
        let page_count = PAGE_SIZE.to_string();
        let url = format!("{}/list.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("crtfc_key", api_key),
                ("bgn_de", today.as_str()),
                ("end_de", today.as_str()),
                ("page_no", "1"),
                ("page_count", page_count.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DisclosureError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DisclosureError::UpstreamUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| DisclosureError::UpstreamUnavailable(e.to_string()))?;

        body.into_filings()
    }
}

#[async_trait]
impl DisclosureSource for DartClient {
    async fn fetch_recent(
        &self,
        lookback_minutes: i64,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<FilingRecord>, DisclosureError> {
        let filings = match self.list_today(now).await {
            Ok(filings) => filings,
            Err(e @ DisclosureError::ConfigMissing(_)) => {
                tracing::error!("{}", e);
                return Err(e);
            }
            Err(e @ DisclosureError::UpstreamRejected { .. }) => {
                tracing::warn!("{}", e);
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("DART request failed: {}", e);
                return Ok(Vec::new());
            }
        };

        let total = filings.len();
        let recent = filter_recent(filings, lookback_window(lookback_minutes), now);

        tracing::info!(
            "DART filings: {} total today, {} in the last {} minutes",
            total,
            recent.len(),
            lookback_minutes
        );

        Ok(recent)
    }
}

/// Body of `list.json`. `list` is absent when `status` is not `000`.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    list: Vec<FilingRecord>,
}

impl ListResponse {
    fn into_filings(self) -> Result<Vec<FilingRecord>, DisclosureError> {
        if self.status != SUCCESS_STATUS {
            return Err(DisclosureError::UpstreamRejected {
                status: self.status,
                message: self.message,
            });
        }
        Ok(self.list)
    }
}
