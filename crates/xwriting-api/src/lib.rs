pub mod client;
pub mod oauth;

pub use client::{iso_utc_now_minus_days, topic_query, FetchRequest, XClient, API_BASE};

use xwriting_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("missing OAuth 1.0a env vars: X_API_KEY, X_API_KEY_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET")]
    MissingCredentials,

    #[error("provide --username/--user-id or X_USERNAME/X_USER_ID")]
    MissingIdentity,

    #[error("could not resolve user id for '{username}'. Response: {body}")]
    UserNotFound { username: String, body: String },

    #[error("lookback of {0} days is out of range")]
    InvalidLookback(u32),

    #[error("could not sign request: {0}")]
    Signing(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("X API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
