//! Advice policy: prompt templates and the keyword advisory.
//!
//! Two independent advice mechanisms exist and are deliberately not
//! unified: a remote generative endpoint (see the adapters crate) and the
//! local keyword advisory implemented here. Both sit behind the
//! [`AdviceProvider`](crate::ports::AdviceProvider) port.

use thiserror::Error;

use crate::domain::{ClassificationResult, Label};
use crate::ports::AdviceProvider;

/// Fallback text used whenever a remote advice fetch fails.
pub const FALLBACK_ADVICE: &str = "Could not fetch advice at this time.";

/// Advisory returned by the keyword classifier for malignant results.
pub const MALIGNANT_ADVISORY: &str =
    "⚠️ Malignant case detected. Consult a dermatologist urgently.";

/// Advisory returned by the keyword classifier for benign results.
pub const BENIGN_ADVISORY: &str =
    "✅ Benign case. Maintain skin hygiene and apply sunscreen daily.";

const MALIGNANT_PROMPT: &str =
    "Give medical advice or next steps for a user whose skin lesion appears malignant.";
const BENIGN_PROMPT: &str =
    "Give daily skincare and sunscreen precautions for benign skin issues.";

/// Errors from the keyword advisory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdviceError {
    /// No result text was supplied.
    #[error("No result provided")]
    MissingInput,
}

/// Returns the fixed prompt template for a label.
///
/// No user data is embedded beyond the label category.
#[must_use]
pub const fn prompt_for(label: Label) -> &'static str {
    match label {
        Label::Malignant => MALIGNANT_PROMPT,
        Label::Benign => BENIGN_PROMPT,
    }
}

/// Keyword advisory over a free-text result string.
///
/// Stateless: a case-insensitive `"malignant"` substring selects the
/// malignant advisory, anything else the benign one. Absent or empty input
/// is an error.
///
/// # Errors
///
/// Returns [`AdviceError::MissingInput`] when `result_text` is `None` or
/// empty.
pub fn advise_for_result(result_text: Option<&str>) -> Result<&'static str, AdviceError> {
    let text = match result_text {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AdviceError::MissingInput),
    };

    if text.to_lowercase().contains("malignant") {
        Ok(MALIGNANT_ADVISORY)
    } else {
        Ok(BENIGN_ADVISORY)
    }
}

/// [`AdviceProvider`] backed by the local keyword advisory.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAdvice;

impl AdviceProvider for KeywordAdvice {
    fn advise(&self, result: &ClassificationResult) -> String {
        // display_text() is never empty, so MissingInput cannot occur here.
        advise_for_result(Some(&result.display_text()))
            .unwrap_or(FALLBACK_ADVICE)
            .to_string()
    }
}
