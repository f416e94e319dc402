//! Outbound prediction request: one multipart POST per submission.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::PredictionResult,
    protocol::{PredictResponse, UPLOAD_FIELD_NAME},
};
use tracing::debug;
use url::Url;

use crate::{error::RequestFailed, types::SelectedFile};

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn predict(&self, file: &SelectedFile) -> Result<Vec<PredictionResult>, RequestFailed>;
}

pub struct HttpPredictionTransport {
    http: Client,
    endpoint: Url,
}

impl HttpPredictionTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionTransport {
    async fn predict(&self, file: &SelectedFile) -> Result<Vec<PredictionResult>, RequestFailed> {
        let part = Part::bytes(file.content().to_vec()).file_name(file.name().to_string());
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        debug!(
            endpoint = %self.endpoint,
            response_bytes = body.len(),
            "predict: response received"
        );
        parse_predictions(&body)
    }
}

/// Decodes a `/predict` success body, keeping the backend's ranking.
pub fn parse_predictions(body: &[u8]) -> Result<Vec<PredictionResult>, RequestFailed> {
    let response: PredictResponse = serde_json::from_slice(body)
        .map_err(|e| RequestFailed::MalformedBody(e.to_string()))?;

    if let Some(invalid) = response
        .predictions
        .iter()
        .find(|prediction| !prediction.has_valid_confidence())
    {
        return Err(RequestFailed::MalformedBody(format!(
            "confidence {} for genre '{}' is outside [0, 1]",
            invalid.confidence, invalid.genre
        )));
    }

    Ok(response.predictions)
}
