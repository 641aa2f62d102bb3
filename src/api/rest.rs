// =============================================================================
// REST API Endpoints: Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/` and are public: the service holds no
// account or user data.
//
// CORS is configured permissively; every request is traced through
// `TraceLayer`.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::analysis::{run_analysis, AnalysisReport};
use crate::app_state::{AppState, ErrorRecord};
use crate::error::{AnalysisError, RequestError};
use crate::signals::IndicatorInfo;
use crate::types::AnalysisRequest;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with tracing and CORS middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analysis", get(analysis_query).post(analysis_body))
        .route("/api/v1/indicators", get(indicators))
        .route("/api/v1/errors", get(recent_errors))
        // ── Middleware & State ───────────────────────────────────────
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

// =============================================================================
// Error responses
// =============================================================================

/// Failure surfaced to the caller as `{ "error": kind, "message": text }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl ApiError {
    /// Input the extractors could not decode at all.
    fn malformed(detail: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "ValidationError",
            message: format!("malformed request: {detail}"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let status = match err {
            AnalysisError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AnalysisError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.kind,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    requests_served: u64,
    provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_weight_1m: Option<u32>,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        requests_served: state.requests_served(),
        provider: state.source.name(),
        provider_weight_1m: state.source.used_weight(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Analysis
// =============================================================================

/// Raw caller input, shared by the query-string and JSON-body forms.
#[derive(Debug, Default, Deserialize)]
struct AnalysisParams {
    symbol: Option<String>,
    interval: Option<String>,
    period: Option<String>,
}

async fn analysis_query(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let params = params.map(|Query(p)| p).map_err(ApiError::from);
    analyze(&state, params).await.map(Json)
}

async fn analysis_body(
    State(state): State<Arc<AppState>>,
    params: Result<Json<AnalysisParams>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let params = params.map(|Json(p)| p).map_err(ApiError::from);
    analyze(&state, params).await.map(Json)
}

async fn analyze(
    state: &AppState,
    params: Result<AnalysisParams, ApiError>,
) -> Result<AnalysisReport, ApiError> {
    state.record_request();
    let request_id = Uuid::new_v4();

    let result = async {
        let params = params?;
        let request = AnalysisRequest::parse(
            params.symbol.as_deref(),
            params.interval.as_deref(),
            params.period.as_deref(),
            state.default_period,
        )?;
        let report = run_analysis(
            state.source.as_ref(),
            Arc::clone(&state.battery),
            &request,
            request_id,
            state.config.max_bars,
        )
        .await?;
        Ok::<_, ApiError>(report)
    }
    .await;

    if let Err(err) = &result {
        warn!(
            %request_id,
            status = err.status.as_u16(),
            kind = err.kind,
            message = %err.message,
            "analysis request failed"
        );
        state.push_error(
            err.message.clone(),
            Some(err.kind.to_string()),
            Some(request_id.to_string()),
        );
    }
    result
}

// =============================================================================
// Indicators & diagnostics
// =============================================================================

async fn indicators(State(state): State<Arc<AppState>>) -> Json<Vec<IndicatorInfo>> {
    Json(state.battery.describe())
}

async fn recent_errors(State(state): State<Arc<AppState>>) -> Json<Vec<ErrorRecord>> {
    Json(state.recent_errors())
}
