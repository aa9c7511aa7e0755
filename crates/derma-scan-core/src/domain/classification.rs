//! Classification outcome types and probability interpretation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability above which a lesion is labelled malignant.
///
/// The boundary is exclusive: exactly 0.5 is benign.
pub const MALIGNANT_THRESHOLD: f32 = 0.5;

/// Categorical classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Lesion classified as benign.
    Benign,
    /// Lesion classified as malignant.
    Malignant,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Benign => write!(f, "Benign"),
            Self::Malignant => write!(f, "Malignant"),
        }
    }
}

/// Result of interpreting a malignancy probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Classification label.
    pub label: Label,
    /// Probability scaled to a percentage, formatted with two decimals.
    ///
    /// This is always the malignancy probability, also for benign results.
    /// Matches the display behavior the product currently ships; see
    /// DESIGN.md before "fixing" it.
    pub confidence_percent: String,
}

impl ClassificationResult {
    /// Returns the `"Label (NN.NN%)"` display form.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} ({}%)", self.label, self.confidence_percent)
    }
}

/// Maps a malignancy probability to a classification result.
///
/// Policy: `probability > 0.5` is malignant, everything else (including
/// exactly 0.5) is benign. Confidence is `probability * 100` with exactly
/// two decimal digits regardless of label.
#[must_use]
pub fn interpret(probability: f32) -> ClassificationResult {
    let label = if probability > MALIGNANT_THRESHOLD {
        Label::Malignant
    } else {
        Label::Benign
    };

    ClassificationResult {
        label,
        confidence_percent: format!("{:.2}", probability * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_probability_is_malignant() {
        assert_eq!(interpret(0.51).label, Label::Malignant);
        assert_eq!(interpret(0.99).label, Label::Malignant);
        assert_eq!(interpret(1.0).label, Label::Malignant);
    }

    #[test]
    fn test_low_probability_is_benign() {
        assert_eq!(interpret(0.0).label, Label::Benign);
        assert_eq!(interpret(0.25).label, Label::Benign);
        assert_eq!(interpret(0.49).label, Label::Benign);
    }

    #[test]
    fn test_boundary_is_benign() {
        // Exclusive boundary: exactly 0.5 stays benign.
        assert_eq!(interpret(0.5).label, Label::Benign);
    }

    #[test]
    fn test_confidence_has_two_decimals() {
        for p in [0.0_f32, 0.125, 0.5, 0.666_66, 0.875, 1.0] {
            let result = interpret(p);
            let (_, decimals) = result
                .confidence_percent
                .split_once('.')
                .expect("decimal point present");
            assert_eq!(decimals.len(), 2, "got {}", result.confidence_percent);
        }
    }

    #[test]
    fn test_confidence_is_raw_probability_for_benign() {
        // The benign branch still reports the malignancy probability.
        let result = interpret(0.2);
        assert_eq!(result.label, Label::Benign);
        assert_eq!(result.confidence_percent, "20.00");
    }

    #[test]
    fn test_display_text() {
        let result = interpret(0.87);
        assert_eq!(result.display_text(), "Malignant (87.00%)");
    }
}
