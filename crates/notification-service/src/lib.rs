mod telegram;
mod templates;

pub use telegram::{TelegramNotifier, DEFAULT_API_BASE, OUTBOUND_TIMEOUT};
pub use templates::{escape_html, AlertTemplate, BatchEntry, NotificationBatch, DETAIL_URL_BASE};

use async_trait::async_trait;
use disclosure_core::DisclosureError;
use serde::{Deserialize, Serialize};

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver pre-rendered HTML text. One attempt, no retry.
    async fn send(&self, text: &str) -> Result<(), DisclosureError>;
    fn name(&self) -> &str;
}

/// Result of a delivery attempt as reported back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub ok: bool,
    pub detail: String,
}

impl From<Result<(), DisclosureError>> for DeliveryOutcome {
    fn from(result: Result<(), DisclosureError>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                detail: "delivered".to_string(),
            },
            Err(e) => Self {
                ok: false,
                detail: e.to_string(),
            },
        }
    }
}

/// Configuration for the chat channel.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl NotificationConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self {
            bot_token: std::env::var("BOT_TOKEN").ok().filter(|s| !s.is_empty()),
            chat_id: std::env::var("CHAT_ID").ok().filter(|s| !s.is_empty()),
            api_base: std::env::var("TELEGRAM_API_BASE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}
