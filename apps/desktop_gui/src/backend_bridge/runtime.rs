//! Backend worker: owns the predictor on its own tokio runtime and streams
//! state snapshots back to the UI.

use std::{sync::Arc, thread};

use client_core::{ControllerEvent, PredictorController, SelectedFile, Settings};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let controller = match PredictorController::from_settings(&settings) {
                Ok(controller) => Arc::new(controller),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("{err:#}"),
                    )));
                    tracing::error!("failed to create predictor: {err:#}");
                    return;
                }
            };

            let events = controller.subscribe();
            tokio::spawn(forward_state_changes(
                controller.clone(),
                events,
                ui_tx.clone(),
            ));
            let _ = ui_tx.try_send(UiEvent::StateChanged(controller.snapshot()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SelectFile { path } => {
                        let _ = ui_tx.try_send(UiEvent::Info(format!(
                            "Loading {}...",
                            path.display()
                        )));
                        match SelectedFile::load(&path).await {
                            Ok(file) => controller.select_file(file),
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::FileSelection,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::Submit => {
                        // Runs off the command loop so a selection made while the
                        // request is pending is applied immediately.
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            let outcome = controller.submit().await;
                            tracing::debug!(?outcome, "submission settled");
                        });
                    }
                }
            }
        });
    });
}

async fn forward_state_changes(
    controller: Arc<PredictorController>,
    mut events: broadcast::Receiver<ControllerEvent>,
    ui_tx: Sender<UiEvent>,
) {
    loop {
        let snapshot = match events.recv().await {
            Ok(ControllerEvent::StateChanged(snapshot)) => snapshot,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "ui lagged behind predictor events");
                controller.snapshot()
            }
            Err(RecvError::Closed) => break,
        };
        match ui_tx.try_send(UiEvent::StateChanged(snapshot)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue full; dropped state update")
            }
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
}
