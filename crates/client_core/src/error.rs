//! The single failure class of a submission.

use thiserror::Error;

/// Why a prediction request did not yield usable predictions.
///
/// The controller never hands this to its consumer; it is logged and then
/// replaced by the sentinel error result.
#[derive(Debug, Error)]
pub enum RequestFailed {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend responded with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed prediction response: {0}")]
    MalformedBody(String),
}

impl From<reqwest::Error> for RequestFailed {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status { status };
        }
        if err.is_decode() {
            return Self::MalformedBody(err.to_string());
        }
        Self::Transport(err)
    }
}
