use std::{fmt, path::Path, sync::Arc};

use anyhow::Context;
use shared::{domain::PredictionResult, protocol::ACCEPTED_EXTENSIONS};

/// A user-chosen audio file held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read audio file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the name carries one of the extensions the upload controls
    /// suggest. Nothing rejects a file on this basis.
    pub fn has_accepted_extension(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size_bytes", &self.content.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    FileSelected,
    Submitting,
    Succeeded(Vec<PredictionResult>),
    /// Always holds exactly the sentinel error result.
    Failed(Vec<PredictionResult>),
}

impl InteractionState {
    pub fn failed() -> Self {
        Self::Failed(vec![PredictionResult::sentinel_error()])
    }

    pub fn results(&self) -> &[PredictionResult] {
        match self {
            Self::Succeeded(results) | Self::Failed(results) => results,
            Self::Idle | Self::FileSelected | Self::Submitting => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileSelected => "file_selected",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Read-only copy of the controller state handed to views.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub state: InteractionState,
    pub selected_file_name: Option<String>,
    pub in_flight: bool,
}

impl ControllerSnapshot {
    pub fn results(&self) -> &[PredictionResult] {
        self.state.results()
    }

    /// Mirrors the "Upload & Predict" control: enabled only with a
    /// selection and nothing pending.
    pub fn can_submit(&self) -> bool {
        self.selected_file_name.is_some() && !self.in_flight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoFileSelected,
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    Succeeded,
    Failed,
    /// The request settled after a newer file was selected; its result was
    /// dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    StateChanged(ControllerSnapshot),
}
