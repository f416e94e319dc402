use serde::{Deserialize, Serialize};

use crate::domain::PredictionResult;

/// Path of the prediction endpoint, relative to the backend base URL.
pub const PREDICT_PATH: &str = "/predict";

/// Multipart field name carrying the uploaded audio bytes.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// File extensions the upload controls suggest. A UI hint, not a server rule.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["wav"];

/// Success body of `POST /predict`. Ranked by the backend; never re-sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<PredictionResult>,
}
