use thiserror::Error;

/// Message shown when the server gives no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Maximum {max} {label} allowed")]
    LimitReached { label: String, max: usize },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn limit(label: impl Into<String>, max: usize) -> Self {
        Self::LimitReached {
            label: label.into(),
            max,
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Text for a single user-facing toast.
    ///
    /// Local failures (validation, limits) carry their own wording. Remote
    /// failures use the server-provided message when there is one and the
    /// generic fallback otherwise.
    pub fn toast_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::LimitReached { .. } => self.to_string(),
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Auth(message) => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// True for failures detected before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::LimitReached { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl<T> From<std::sync::PoisonError<T>> for ConsoleError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
