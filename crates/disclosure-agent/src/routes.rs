use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use disclosure_core::{is_business_hours, Clock, CycleOutcome, DisclosureSource, FilingRecord};
use notification_service::{AlertTemplate, DeliveryOutcome, NotificationChannel};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::SecretStatus;
use crate::cycle::CycleOrchestrator;

/// Window used by `/test-dart`, wider than the regular cycle's.
pub const PREVIEW_LOOKBACK_MINUTES: i64 = 60;
const PREVIEW_LIMIT: usize = 5;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S KST";

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CycleOrchestrator>,
    pub source: Arc<dyn DisclosureSource>,
    pub channel: Arc<dyn NotificationChannel>,
    pub clock: Arc<dyn Clock>,
    pub secrets: SecretStatus,
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub service: &'static str,
    pub status: &'static str,
    pub time: String,
    pub business_hours: bool,
}

#[derive(Serialize)]
pub struct ConnectionReport {
    pub test: &'static str,
    pub config: SecretStatus,
    pub telegram: DeliveryOutcome,
    pub time: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/test-connection", get(test_connection))
        .route("/check-disclosures", get(check_disclosures))
        .route("/cron/check-disclosures", get(check_disclosures))
        .route("/test-dart", get(test_dart))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Json<ServiceStatus> {
    let now = state.clock.now();
    Json(ServiceStatus {
        service: "DART 공시 알림 봇",
        status: "running",
        time: now.format(TIME_FORMAT).to_string(),
        business_hours: is_business_hours(now),
    })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Sends a self-test message so the operator can confirm the chat wiring.
async fn test_connection(State(state): State<AppState>) -> Json<ConnectionReport> {
    let now = state.clock.now();
    let text = AlertTemplate::render_connection_test(
        now,
        is_business_hours(now),
        &state.secrets.entries(),
    );

    let telegram = DeliveryOutcome::from(state.channel.send(&text).await);

    Json(ConnectionReport {
        test: "connection",
        config: state.secrets,
        telegram,
        time: now.format(TIME_FORMAT).to_string(),
    })
}

async fn check_disclosures(State(state): State<AppState>) -> Json<CycleOutcome> {
    Json(state.orchestrator.run_check_cycle().await)
}

/// Raw upstream preview: ignores business hours and dedup.
async fn test_dart(State(state): State<AppState>) -> Json<Value> {
    if !state.secrets.dart_api_key {
        return Json(json!({ "status": "error", "message": "DART_API_KEY not set" }));
    }

    let now = state.clock.now();
    match state.source.fetch_recent(PREVIEW_LOOKBACK_MINUTES, now).await {
        Ok(filings) => {
            let count = filings.len();
            let disclosures: Vec<FilingRecord> =
                filings.into_iter().take(PREVIEW_LIMIT).collect();
            Json(json!({
                "status": "success",
                "count": count,
                "disclosures": disclosures,
            }))
        }
        Err(e) => Json(json!({ "status": "error", "message": e.to_string() })),
    }
}
