//! Rendering helpers shared by the CLI and the desktop UI.

use shared::domain::PredictionResult;

use crate::types::ControllerSnapshot;

/// One progress-bar row, in the order the backend ranked it.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub genre: String,
    pub confidence: f64,
    pub percent_label: String,
    pub bar_fraction: f32,
}

impl PredictionRow {
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            genre: display_genre(&result.genre),
            confidence: result.confidence,
            percent_label: format_confidence_percent(result.confidence),
            bar_fraction: result.confidence.clamp(0.0, 1.0) as f32,
        }
    }
}

pub fn prediction_rows(results: &[PredictionResult]) -> Vec<PredictionRow> {
    results.iter().map(PredictionRow::from_result).collect()
}

pub fn format_confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn display_genre(genre: &str) -> String {
    let mut chars = genre.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plain-text rendering of a snapshot, used by the CLI.
pub fn render_text_report(snapshot: &ControllerSnapshot, bar_width: usize) -> String {
    let mut lines = Vec::new();

    if let Some(name) = &snapshot.selected_file_name {
        lines.push(format!("Selected: {name}"));
    }
    if snapshot.in_flight {
        lines.push("Predicting...".to_string());
    }

    let rows = prediction_rows(snapshot.results());
    if !rows.is_empty() {
        lines.push("Top Predictions:".to_string());
        let label_width = rows
            .iter()
            .map(|row| row.genre.chars().count())
            .max()
            .unwrap_or(0);
        for row in rows {
            lines.push(format!(
                "{:<label_width$}  [{}]  {}",
                row.genre,
                text_bar(row.bar_fraction, bar_width),
                row.percent_label
            ));
        }
    }

    lines.join("\n")
}

fn text_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction * width as f32).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
