use async_trait::async_trait;
use disclosure_core::DisclosureError;
use reqwest::Client;
use serde::Deserialize;

use crate::{NotificationChannel, NotificationConfig};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bound applied to every `sendMessage` call.
pub const OUTBOUND_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Telegram Bot API notifier posting HTML messages to one chat.
pub struct TelegramNotifier {
    bot_token: Option<String>,
    chat_id: Option<String>,
    api_base: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(config: &NotificationConfig) -> Self {
        let client = Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            bot_token: config.bot_token.clone().filter(|s| !s.is_empty()),
            chat_id: config.chat_id.clone().filter(|s| !s.is_empty()),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), DisclosureError> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat_id)) => Ok((token, chat_id)),
            (token, chat_id) => {
                tracing::error!(
                    "Telegram credentials missing - BOT_TOKEN: {}, CHAT_ID: {}",
                    token.is_some(),
                    chat_id.is_some()
                );
                let missing: Vec<&str> = [("BOT_TOKEN", token.is_none()), ("CHAT_ID", chat_id.is_none())]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| name)
                    .collect();
                Err(DisclosureError::ConfigMissing(missing.join(", ")))
            }
        }
    }
}

/// Map a `sendMessage` reply to a delivery result.
fn interpret_response(http_ok: bool, body: &str) -> Result<(), DisclosureError> {
    let parsed: SendMessageResponse = serde_json::from_str(body)
        .map_err(|e| DisclosureError::DeliveryFailed(format!("unreadable response: {}", e)))?;

    if http_ok && parsed.ok {
        return Ok(());
    }

    Err(DisclosureError::DeliveryFailed(
        parsed
            .description
            .unwrap_or_else(|| "unknown error".to_string()),
    ))
}

#[async_trait]
impl NotificationChannel for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DisclosureError> {
        let (token, chat_id) = self.credentials()?;

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Telegram send failed: {}", e);
                DisclosureError::DeliveryFailed(e.to_string())
            })?;

        let http_ok = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| DisclosureError::DeliveryFailed(e.to_string()))?;

        match interpret_response(http_ok, &body) {
            Ok(()) => {
                tracing::info!("Telegram message delivered");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Telegram API error: {}", e);
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
