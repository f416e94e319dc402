//! Folds backend events into the state the UI draws from.

use client_core::{ControllerSnapshot, InteractionState};

use crate::controller::events::{UiError, UiEvent};

pub struct ViewState {
    pub snapshot: ControllerSnapshot,
    pub status: String,
    pub last_error: Option<UiError>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            snapshot: ControllerSnapshot {
                state: InteractionState::Idle,
                selected_file_name: None,
                in_flight: false,
            },
            status: "Starting...".to_string(),
            last_error: None,
        }
    }
}

pub fn apply_ui_event(view: &mut ViewState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => view.status = message,
        UiEvent::Error(error) => {
            view.status = error.summary();
            view.last_error = Some(error);
        }
        UiEvent::StateChanged(snapshot) => {
            view.status = match &snapshot.state {
                InteractionState::Idle => "Choose an audio file to begin".to_string(),
                InteractionState::FileSelected => "Ready to upload".to_string(),
                InteractionState::Submitting => "Predicting...".to_string(),
                InteractionState::Succeeded(_) => "Prediction complete".to_string(),
                InteractionState::Failed(_) => "Prediction failed".to_string(),
            };
            if matches!(snapshot.state, InteractionState::FileSelected) {
                view.last_error = None;
            }
            view.snapshot = snapshot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorContext;
    use shared::domain::PredictionResult;

    fn snapshot(state: InteractionState, in_flight: bool) -> ControllerSnapshot {
        ControllerSnapshot {
            state,
            selected_file_name: Some("track.wav".to_string()),
            in_flight,
        }
    }

    #[test]
    fn submitting_snapshot_disables_upload() {
        let mut view = ViewState::new();
        apply_ui_event(
            &mut view,
            UiEvent::StateChanged(snapshot(InteractionState::Submitting, true)),
        );
        assert_eq!(view.status, "Predicting...");
        assert!(!view.snapshot.can_submit());
    }

    #[test]
    fn failure_is_rendered_through_results() {
        let mut view = ViewState::new();
        apply_ui_event(
            &mut view,
            UiEvent::StateChanged(snapshot(InteractionState::failed(), false)),
        );
        assert_eq!(view.status, "Prediction failed");
        assert_eq!(
            view.snapshot.results(),
            &[PredictionResult::sentinel_error()]
        );
        assert!(view.snapshot.can_submit());
    }

    #[test]
    fn new_selection_clears_previous_error() {
        let mut view = ViewState::new();
        apply_ui_event(
            &mut view,
            UiEvent::Error(UiError::from_message(
                UiErrorContext::FileSelection,
                "failed to read audio file",
            )),
        );
        assert_eq!(view.status, "File selection failed: failed to read audio file");
        assert!(view.last_error.is_some());

        apply_ui_event(
            &mut view,
            UiEvent::StateChanged(snapshot(InteractionState::FileSelected, false)),
        );
        assert!(view.last_error.is_none());
        assert_eq!(view.status, "Ready to upload");
    }
}
