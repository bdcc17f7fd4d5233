use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, HeaderValue},
    response::{
        sse::{KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use campaigniq_core::{generate, Channel, DataSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::report::build_report;
use crate::streaming::{sse_stream, PacingPolicy};
use crate::{ApiError, ApiResult, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// Accept one chat request and answer with an SSE stream of the generated
/// campaign report. Once the stream starts there is no error path; a body
/// that fails to parse never opens a stream and gets an opaque 500 instead.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|rejection| {
        error!("rejected chat request body: {}", rejection);
        ApiError::Internal(rejection.to_string())
    })?;

    let mut rng = match state.settings.generator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let recommendation = generate(
        &request.message,
        &request.data_sources,
        &request.channels,
        &mut rng,
    );
    let report = build_report(&recommendation)?;

    let stream_id = Uuid::new_v4();
    debug!(
        %stream_id,
        chunking = ?state.settings.streaming.chunking,
        report_bytes = report.len(),
        "starting chat stream"
    );

    let pacing = PacingPolicy::from_config(&state.settings.streaming);
    let stream = sse_stream(report, state.settings.streaming.chunking, pacing);

    Ok((
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (
                HeaderName::from_static("x-accel-buffering"),
                HeaderValue::from_static("no"),
            ),
        ],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    ))
}
