//! Screening result record types.

use serde::{Deserialize, Serialize};

use super::{ClassificationResult, Label};

/// Complete outcome of one screening run for a single image.
///
/// Classification and advice are set together as a unit; a record is only
/// built once both are known (advice may be the fixed fallback text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRecord {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Classification label.
    pub label: Label,
    /// Confidence percentage string (two decimals).
    pub confidence_percent: String,
    /// Advice text shown alongside the result.
    pub advice: String,
}

impl ScreeningRecord {
    /// Builds a record from a classification result and its advice text.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        result: &ClassificationResult,
        advice: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            label: result.label,
            confidence_percent: result.confidence_percent.clone(),
            advice: advice.into(),
        }
    }
}
