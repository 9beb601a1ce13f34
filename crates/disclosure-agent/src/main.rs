use anyhow::Result;
use disclosure_agent::AgentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
        tracing::error!("PANIC: {info}");
    }));

    tracing::info!("Starting DART disclosure alert agent");

    let config = AgentConfig::from_env()?;
    let secrets = config.secret_status();
    tracing::info!("Configuration loaded");
    tracing::info!("  Port: {}", config.port);
    tracing::info!("  Lookback: {} minutes", config.lookback_minutes);
    tracing::info!(
        "  Secrets: DART_API_KEY={} BOT_TOKEN={} CHAT_ID={}",
        secrets.dart_api_key,
        secrets.bot_token,
        secrets.chat_id
    );
    if !secrets.dart_api_key {
        tracing::warn!("DART_API_KEY is missing; check cycles will report errors");
    }
    if !config.notification.is_complete() {
        tracing::warn!("Telegram credentials are incomplete; delivery will fail");
    }

    disclosure_agent::run_server(config).await
}
