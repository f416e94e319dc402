use serde::{Deserialize, Serialize};

/// Label of the synthetic result shown in place of predictions when a
/// submission fails.
pub const ERROR_GENRE: &str = "Error";

/// One `(genre, confidence)` pair as ranked by the backend classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub genre: String,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(genre: impl Into<String>, confidence: f64) -> Self {
        Self {
            genre: genre.into(),
            confidence,
        }
    }

    pub fn sentinel_error() -> Self {
        Self::new(ERROR_GENRE, 0.0)
    }

    pub fn is_sentinel_error(&self) -> bool {
        self.genre == ERROR_GENRE && self.confidence == 0.0
    }

    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_error_label_with_zero_confidence() {
        let sentinel = PredictionResult::sentinel_error();
        assert_eq!(sentinel.genre, "Error");
        assert_eq!(sentinel.confidence, 0.0);
        assert!(sentinel.is_sentinel_error());
        assert!(!PredictionResult::new("rock", 0.0).is_sentinel_error());
    }

    #[test]
    fn confidence_must_lie_in_unit_interval() {
        assert!(PredictionResult::new("jazz", 0.0).has_valid_confidence());
        assert!(PredictionResult::new("jazz", 1.0).has_valid_confidence());
        assert!(!PredictionResult::new("jazz", 1.2).has_valid_confidence());
        assert!(!PredictionResult::new("jazz", -0.1).has_valid_confidence());
        assert!(!PredictionResult::new("jazz", f64::NAN).has_valid_confidence());
    }
}
