use anyhow::{Context, Result};
use notification_service::NotificationConfig;
use serde::Serialize;
use std::env;

use crate::cycle::DEFAULT_LOOKBACK_MINUTES;

/// Only today's filings are fetched, so a window past one day adds nothing.
pub const MAX_LOOKBACK_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    // Upstream disclosure API
    pub dart_api_key: Option<String>,
    pub dart_api_base: String,

    // Chat delivery
    pub notification: NotificationConfig,

    // HTTP trigger surface
    pub port: u16,

    // Cycle parameters
    pub lookback_minutes: i64,
    pub check_interval_seconds: u64, // 0 = rely on an external scheduler
}

/// Which secrets are present, for the status endpoints. Never the values.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SecretStatus {
    #[serde(rename = "DART_API_KEY")]
    pub dart_api_key: bool,
    #[serde(rename = "BOT_TOKEN")]
    pub bot_token: bool,
    #[serde(rename = "CHAT_ID")]
    pub chat_id: bool,
}

impl SecretStatus {
    pub fn entries(&self) -> [(&'static str, bool); 3] {
        [
            ("DART_API_KEY", self.dart_api_key),
            ("BOT_TOKEN", self.bot_token),
            ("CHAT_ID", self.chat_id),
        ]
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn validate_lookback(minutes: i64) -> Result<()> {
    if !(1..=MAX_LOOKBACK_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "LOOKBACK_MINUTES must be between 1 and {}, got {}",
            MAX_LOOKBACK_MINUTES,
            minutes
        );
    }
    Ok(())
}

impl AgentConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            dart_api_key: non_empty("DART_API_KEY"),
            dart_api_base: non_empty("DART_API_BASE")
                .unwrap_or_else(|| dart_client::DEFAULT_BASE_URL.to_string()),

            notification: NotificationConfig::from_env(),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            lookback_minutes: env::var("LOOKBACK_MINUTES")
                .unwrap_or_else(|_| DEFAULT_LOOKBACK_MINUTES.to_string())
                .parse()
                .context("LOOKBACK_MINUTES must be an integer")?,
            check_interval_seconds: env::var("CHECK_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .context("CHECK_INTERVAL_SECONDS must be a non-negative integer")?,
        };

        validate_lookback(config.lookback_minutes)?;

        Ok(config)
    }

    pub fn secret_status(&self) -> SecretStatus {
        SecretStatus {
            dart_api_key: self.dart_api_key.is_some(),
            bot_token: self.notification.bot_token.is_some(),
            chat_id: self.notification.chat_id.is_some(),
        }
    }
}
