//! Application state for the derma-scan server.
//!
//! Holds the in-memory user store, token signing, and the advice mode the
//! process was started with.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How `/api/advice` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AdviceMode {
    /// Always return the fixed daily skincare tip
    Tip,
    /// Map the posted result text to the matching advisory
    Keyword,
}

/// Errors from the auth operations.
///
/// Messages match the wire contract exactly; handlers serialize
/// `to_string()` into the `msg` field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password missing/empty.
    #[error("Please fill in all fields.")]
    MissingFields,
    /// Registration attempted with an email that already has an account.
    #[error("Email already exists")]
    EmailExists,
    /// Unknown email or wrong password. One message for both, so login
    /// responses cannot be used to enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Hashing or signing failed.
    #[error("Server error")]
    Internal,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    jti: u64,
}

/// Shared application state.
pub struct AppState {
    /// Email -> bcrypt hash. Process-lived; persistence is out of scope.
    users: RwLock<HashMap<String, String>>,
    jwt_secret: String,
    bcrypt_cost: u32,
    /// Monotonic token id so repeated sign-ins yield distinct tokens.
    token_counter: AtomicU64,
    /// Advice mode selected at startup.
    pub advice_mode: AdviceMode,
    /// Server start time.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state with the production bcrypt cost.
    #[must_use]
    pub fn new(jwt_secret: impl Into<String>, advice_mode: AdviceMode) -> Self {
        Self::with_cost(jwt_secret, advice_mode, bcrypt::DEFAULT_COST)
    }

    /// Creates state with an explicit bcrypt cost. Tests use a low cost to
    /// keep hashing fast.
    #[must_use]
    pub fn with_cost(jwt_secret: impl Into<String>, advice_mode: AdviceMode, cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            jwt_secret: jwt_secret.into(),
            bcrypt_cost: cost,
            token_counter: AtomicU64::new(0),
            advice_mode,
            started_at: Instant::now(),
        }
    }

    /// Registers a new account and returns a signed token.
    ///
    /// # Errors
    ///
    /// `MissingFields` for empty email/password, `EmailExists` for
    /// duplicates (no account is created and no token issued), `Internal`
    /// if hashing or signing fails.
    pub fn register(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let mut users = self.users.write().map_err(|_| AuthError::Internal)?;
        if users.contains_key(email) {
            return Err(AuthError::EmailExists);
        }

        let hash = bcrypt::hash(password, self.bcrypt_cost).map_err(|_| AuthError::Internal)?;
        users.insert(email.to_string(), hash);
        drop(users);

        self.sign_token(email)
    }

    /// Verifies credentials and returns a signed token.
    ///
    /// # Errors
    ///
    /// `MissingFields` for empty email/password, `InvalidCredentials` for
    /// unknown email or wrong password (same variant for both).
    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let hash = {
            let users = self.users.read().map_err(|_| AuthError::Internal)?;
            users
                .get(email)
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?
        };

        let matches = bcrypt::verify(password, &hash).map_err(|_| AuthError::Internal)?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        self.sign_token(email)
    }

    /// Returns true when the token was signed with this server's secret.
    #[must_use]
    pub fn verify_token(&self, token: &str) -> bool {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        // Tokens carry no expiry; signature is the whole check.
        validation.validate_exp = false;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .is_ok()
    }

    fn sign_token(&self, email: &str) -> Result<String, AuthError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let claims = Claims {
            sub: email.to_string(),
            iat,
            jti: self.token_counter.fetch_add(1, Ordering::Relaxed),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| AuthError::Internal)
    }
}

pub type SharedState = Arc<AppState>;
