use std::{fs, path::Path};

use anyhow::Context;
use shared::domain::PredictionResult;

use crate::default_predictions;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub predictions: Vec<PredictionResult>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            predictions: default_predictions(),
        }
    }
}

/// `MOCK_BACKEND_BIND` overrides the listen address; `MOCK_BACKEND_PREDICTIONS`
/// names a JSON file holding the prediction list to serve.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(v) = std::env::var("MOCK_BACKEND_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(path) = std::env::var("MOCK_BACKEND_PREDICTIONS") {
        settings.predictions = load_predictions(Path::new(&path))?;
    }

    Ok(settings)
}

pub fn load_predictions(path: &Path) -> anyhow::Result<Vec<PredictionResult>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read predictions file '{}'", path.display()))?;
    let predictions: Vec<PredictionResult> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid predictions file '{}'", path.display()))?;
    if let Some(invalid) = predictions.iter().find(|p| !p.has_valid_confidence()) {
        anyhow::bail!(
            "confidence {} for genre '{}' in '{}' is outside [0, 1]",
            invalid.confidence,
            invalid.genre,
            path.display()
        );
    }
    Ok(predictions)
}
