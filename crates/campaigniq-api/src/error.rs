use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campaigniq_core::CampaignError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every pre-stream failure surfaces as an opaque 500; the detail
        // only goes to the log at the call site.
        let body = Json(json!({ "error": "Internal server error" }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
