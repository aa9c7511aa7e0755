//! Registration and login endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::{AuthError, SharedState};

#[derive(Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub msg: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingFields | Self::EmailExists | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                msg: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /api/auth/register - Create an account and return a token.
pub async fn register(
    State(state): State<SharedState>,
    Json(body): Json<Credentials>,
) -> Response {
    match state.register(&body.email, &body.password) {
        Ok(token) => {
            info!("Registered account for {}", body.email);
            (StatusCode::CREATED, Json(TokenResponse { token })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /api/auth/login - Verify credentials and return a token.
pub async fn login(State(state): State<SharedState>, Json(body): Json<Credentials>) -> Response {
    match state.login(&body.email, &body.password) {
        Ok(token) => Json(TokenResponse { token }).into_response(),
        Err(e) => e.into_response(),
    }
}
