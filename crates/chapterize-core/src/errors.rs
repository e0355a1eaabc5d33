use std::time::Duration;

/// Errors from LLM calls: transport failures plus the one parse failure a
/// free-text response can produce. All of them are terminal for a
/// segmentation run; retry policy belongs to callers.
#[derive(Clone, Debug, thiserror::Error)]
pub enum LlmError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("rate limited")]
    RateLimited,
    #[error("provider overloaded")]
    Overloaded,
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The response text did not contain the decodable payload the caller
    /// expected.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::InvalidRequest(_) => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::Overloaded => "overloaded",
            Self::ServerError { .. } => "server_error",
            Self::Network(_) => "network_error",
            Self::Timeout(_) => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    /// True for failures of the call itself, as opposed to failures to make
    /// sense of what came back.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::MalformedResponse(_))
    }

    /// Classify an HTTP status code into the appropriate error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited,
            529 => Self::Overloaded,
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidRequest(format!("unexpected status {status}: {body}")),
        }
    }
}
