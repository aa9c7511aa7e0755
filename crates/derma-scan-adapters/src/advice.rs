//! Remote advice endpoint adapter.

use derma_scan_core::advice::prompt_for;
use derma_scan_core::{AdviceProvider, ClassificationResult, FALLBACK_ADVICE};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Text returned when the endpoint answers without an advice field.
const NO_ADVICE_RECEIVED: &str = "No advice received.";

#[derive(Serialize)]
struct AdviceRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AdviceResponse {
    advice: Option<String>,
}

/// [`AdviceProvider`] backed by a remote text-generation endpoint.
///
/// Sends the label's fixed prompt template and expects
/// `{"advice": "..."}` back. Failures are non-fatal by contract: any
/// network or parse error yields the fixed fallback text instead of an
/// error, so advice can never block display of a computed result.
///
/// No explicit timeout or retry is configured; a hung endpoint hangs the
/// fetch (known gap, kept deliberately).
pub struct HttpAdviceProvider {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpAdviceProvider {
    /// Creates a provider for the given advice endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch(&self, prompt: &str) -> anyhow::Result<String> {
        let response: AdviceResponse = self
            .client
            .post(&self.endpoint)
            .json(&AdviceRequest { prompt })
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response
            .advice
            .unwrap_or_else(|| NO_ADVICE_RECEIVED.to_string()))
    }
}

impl AdviceProvider for HttpAdviceProvider {
    fn advise(&self, result: &ClassificationResult) -> String {
        let prompt = prompt_for(result.label);
        match self.fetch(prompt) {
            Ok(advice) => advice,
            Err(err) => {
                warn!("Advice fetch failed: {err:#}");
                FALLBACK_ADVICE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_scan_core::interpret;

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        // Port 9 (discard) refuses connections on any sane test host.
        let provider = HttpAdviceProvider::new("http://127.0.0.1:9/api/advice");
        let advice = provider.advise(&interpret(0.9));
        assert_eq!(advice, FALLBACK_ADVICE);
    }
}
