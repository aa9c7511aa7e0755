//! Advice provider port.

use crate::domain::ClassificationResult;

/// Port for turning a classification result into guidance text.
///
/// Implementations never fail: a provider that cannot produce advice
/// returns its fallback text instead. Advice must never block display of a
/// result that has already been computed.
pub trait AdviceProvider: Send + Sync {
    /// Returns advice text for a classification result.
    fn advise(&self, result: &ClassificationResult) -> String;
}
