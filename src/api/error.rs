use crate::auth::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("validation failed: {}", describe(.0))]
    Validation(FieldErrors),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// Identifiants absents ou expirés : la session doit être rouverte.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join(", ")
}
