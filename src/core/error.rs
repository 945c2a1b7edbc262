//! Error taxonomy shared by the HTTP client, services and session store.

/// Message shown when the backend gives no usable explanation
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Failure of a call made through the API client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server-supplied message, if any.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Http { status: u16, message: Option<String> },

    /// 401 that could not be recovered by refreshing the access token
    #[error("Session expired")]
    SessionExpired,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid request payload: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Message the backend put in the error body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Human-readable message for a notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { .. } => self.to_string(),
            ApiError::SessionExpired => "Please log in again".to_string(),
            ApiError::Timeout => "The server took too long to respond.".to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Failure below the HTTP layer, reported by a [`Transport`](crate::core::http::Transport).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Network(String),

    #[error("could not build request: {0}")]
    Build(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Network(msg) => ApiError::Transport(msg),
            TransportError::Build(msg) => ApiError::Encode(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
