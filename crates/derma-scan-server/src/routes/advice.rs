//! Advice endpoint.
//!
//! Two deployment variants share the route; `--advice-mode` picks one at
//! startup. `tip` ignores the body entirely, `keyword` maps the posted
//! result text to the matching advisory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use derma_scan_core::advise_for_result;
use serde::{Deserialize, Serialize};

use super::auth::ErrorResponse;
use crate::state::{AdviceMode, SharedState};

/// Fixed tip served by the `tip` variant.
const DAILY_TIP: &str = "Healthy skin begins with daily habits. Start by drinking at least 8 glasses of water a day to keep your skin hydrated from within. Always apply a broad-spectrum sunscreen with SPF 30 or higher, even on cloudy days or indoors, as UV rays can still cause damage. At night, gently cleanse your face to remove dirt and oils, and use a moisturizer suited to your skin type. Avoid touching your face frequently, get enough sleep, and follow a balanced diet rich in antioxidants and vitamins. These simple steps go a long way in keeping your skin clear, youthful, and protected. 💧☀️";

#[derive(Deserialize, Default)]
pub struct AdviceRequest {
    pub result: Option<String>,
}

#[derive(Serialize)]
struct AdviceResponse {
    advice: String,
}

/// POST /api/advice - Return advice for a screening result.
pub async fn get_advice(
    State(state): State<SharedState>,
    body: Option<Json<AdviceRequest>>,
) -> Response {
    match state.advice_mode {
        AdviceMode::Tip => Json(AdviceResponse {
            advice: DAILY_TIP.to_string(),
        })
        .into_response(),
        AdviceMode::Keyword => {
            let result = body.and_then(|Json(b)| b.result);
            match advise_for_result(result.as_deref()) {
                Ok(advice) => Json(AdviceResponse {
                    advice: advice.to_string(),
                })
                .into_response(),
                Err(e) => (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        msg: e.to_string(),
                    }),
                )
                    .into_response(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_scan_core::AdviceError;

    #[test]
    fn test_daily_tip_matches_contract() {
        assert!(DAILY_TIP.starts_with("Healthy skin begins with daily habits."));
        assert!(DAILY_TIP.ends_with("💧☀️"));
    }

    #[test]
    fn test_keyword_variant_error_message() {
        assert_eq!(
            advise_for_result(None),
            Err(AdviceError::MissingInput)
        );
        assert_eq!(AdviceError::MissingInput.to_string(), "No result provided");
    }
}
