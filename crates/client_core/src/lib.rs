use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::domain::PredictionResult;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{load_settings, predict_endpoint, Settings};
pub use error::RequestFailed;
pub use transport::{HttpPredictionTransport, PredictionTransport};
pub use types::{
    ControllerEvent, ControllerSnapshot, InteractionState, RejectReason, SelectedFile,
    SubmitOutcome,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct ControllerState {
    selected: Option<SelectedFile>,
    state: InteractionState,
    in_flight: bool,
    /// Bumped on every selection so a late response for an older file is
    /// recognised and dropped.
    selection_generation: u64,
}

impl ControllerState {
    fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state.clone(),
            selected_file_name: self.selected.as_ref().map(|f| f.name().to_string()),
            in_flight: self.in_flight,
        }
    }
}

/// Owns the upload-and-predict interaction: the selected file, the
/// in-flight flag, and the last result set.
///
/// At most one prediction request is in flight per controller. The state
/// lock is never held across the network call, so `snapshot` and
/// `select_file` stay responsive while a submission is pending.
pub struct PredictorController {
    transport: Arc<dyn PredictionTransport>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl PredictorController {
    pub fn new(transport: Arc<dyn PredictionTransport>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            inner: Mutex::new(ControllerState {
                selected: None,
                state: InteractionState::Idle,
                in_flight: false,
                selection_generation: 0,
            }),
            events,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoint = settings.predict_endpoint()?;
        info!(%endpoint, "predictor: using prediction endpoint");
        Ok(Self::new(Arc::new(HttpPredictionTransport::new(endpoint))))
    }

    pub fn select_file(&self, file: SelectedFile) {
        let mut inner = self.lock();
        debug!(
            file_name = %file.name(),
            size_bytes = file.len(),
            accepted_extension = file.has_accepted_extension(),
            "predictor: file selected"
        );
        inner.selected = Some(file);
        inner.state = InteractionState::FileSelected;
        inner.selection_generation = inner.selection_generation.wrapping_add(1);
        self.emit(&inner);
    }

    /// Uploads the selected file and waits for the backend's predictions.
    ///
    /// Failures never escape: they leave the controller in
    /// [`InteractionState::Failed`] with the sentinel error result.
    pub async fn submit(&self) -> SubmitOutcome {
        let (file, generation) = {
            let mut inner = self.lock();
            let Some(file) = inner.selected.clone() else {
                debug!("predictor: submit rejected, no file selected");
                return SubmitOutcome::Rejected(RejectReason::NoFileSelected);
            };
            if inner.in_flight {
                debug!(
                    file_name = %file.name(),
                    "predictor: submit rejected, request already in flight"
                );
                return SubmitOutcome::Rejected(RejectReason::AlreadySubmitting);
            }
            inner.in_flight = true;
            inner.state = InteractionState::Submitting;
            self.emit(&inner);
            (file, inner.selection_generation)
        };

        info!(
            file_name = %file.name(),
            size_bytes = file.len(),
            "predictor: submitting file for prediction"
        );
        let in_flight = InFlight {
            controller: self,
            generation,
            file_name: file.name().to_string(),
            settled: false,
        };
        let result = self.transport.predict(&file).await;
        in_flight.settle(result)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.lock().snapshot()
    }

    pub fn state(&self) -> InteractionState {
        self.lock().state.clone()
    }

    pub fn results(&self) -> Vec<PredictionResult> {
        self.lock().state.results().to_vec()
    }

    pub fn selected_file(&self) -> Option<SelectedFile> {
        self.lock().selected.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().in_flight
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        // A panic while holding the lock cannot leave the state half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, inner: &ControllerState) {
        // No subscribers is fine.
        let _ = self
            .events
            .send(ControllerEvent::StateChanged(inner.snapshot()));
    }

    fn finish(
        &self,
        generation: u64,
        file_name: &str,
        result: Option<Result<Vec<PredictionResult>, RequestFailed>>,
    ) -> SubmitOutcome {
        let mut inner = self.lock();
        inner.in_flight = false;

        if inner.selection_generation != generation {
            debug!(
                %file_name,
                "predictor: dropping result for a file that is no longer selected"
            );
            self.emit(&inner);
            return SubmitOutcome::Superseded;
        }

        let outcome = match result {
            Some(Ok(predictions)) => {
                info!(
                    %file_name,
                    predictions = predictions.len(),
                    top_genre = predictions.first().map(|p| p.genre.as_str()).unwrap_or("-"),
                    "predictor: prediction succeeded"
                );
                inner.state = InteractionState::Succeeded(predictions);
                SubmitOutcome::Succeeded
            }
            Some(Err(error)) => {
                warn!(%file_name, %error, "predictor: prediction request failed");
                inner.state = InteractionState::failed();
                SubmitOutcome::Failed
            }
            None => {
                warn!(%file_name, "predictor: submission abandoned before the response settled");
                inner.state = InteractionState::failed();
                SubmitOutcome::Failed
            }
        };
        self.emit(&inner);
        outcome
    }
}

/// Clears the in-flight flag when a submission ends, including when the
/// submitting future is dropped mid-request.
struct InFlight<'a> {
    controller: &'a PredictorController,
    generation: u64,
    file_name: String,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: Result<Vec<PredictionResult>, RequestFailed>) -> SubmitOutcome {
        self.settled = true;
        self.controller
            .finish(self.generation, &self.file_name, Some(result))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.finish(self.generation, &self.file_name, None);
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
