//! Local stand-in for the genre prediction service.
//!
//! Accepts the same multipart upload as the real backend and answers with a
//! fixed, pre-ranked prediction list. No audio is decoded.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::PredictionResult,
    error::{ApiError, ErrorCode},
    protocol::{PredictResponse, PREDICT_PATH, UPLOAD_FIELD_NAME},
};
use tracing::{info, warn};

pub mod config;

pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct MockBackendState {
    predictions: Arc<Vec<PredictionResult>>,
    requests_served: Arc<AtomicUsize>,
}

impl MockBackendState {
    pub fn new(predictions: Vec<PredictionResult>) -> Self {
        Self {
            predictions: Arc::new(predictions),
            requests_served: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `/predict` calls that reached the handler, successful or not.
    pub fn requests_served(&self) -> usize {
        self.requests_served.load(Ordering::SeqCst)
    }
}

/// Top three guesses for a typical GTZAN clip.
pub fn default_predictions() -> Vec<PredictionResult> {
    vec![
        PredictionResult::new("jazz", 0.6),
        PredictionResult::new("blues", 0.3),
        PredictionResult::new("classical", 0.1),
    ]
}

pub fn build_router(state: MockBackendState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(PREDICT_PATH, post(predict))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

struct Upload {
    file_name: Option<String>,
    size_bytes: usize,
}

async fn predict(
    State(state): State<MockBackendState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ApiError>)> {
    state.requests_served.fetch_add(1, Ordering::SeqCst);

    let upload = read_upload(multipart).await.map_err(|(status, e)| {
        warn!(code = ?e.code, message = %e.message, "predict: rejected upload");
        (status, Json(e))
    })?;
    info!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        size_bytes = upload.size_bytes,
        "predict: upload received"
    );

    Ok(Json(PredictResponse {
        predictions: state.predictions.as_ref().clone(),
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, (StatusCode, ApiError)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                ApiError::new(ErrorCode::Validation, "uploaded file is empty"),
            ));
        }
        return Ok(Upload {
            file_name,
            size_bytes: bytes.len(),
        });
    }

    Err((
        StatusCode::BAD_REQUEST,
        ApiError::new(
            ErrorCode::Validation,
            format!("missing multipart field '{UPLOAD_FIELD_NAME}'"),
        ),
    ))
}

fn multipart_error(err: MultipartError) -> (StatusCode, ApiError) {
    let status = err.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorCode::PayloadTooLarge
    } else {
        ErrorCode::Validation
    };
    (status, ApiError::new(code, err.body_text()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
