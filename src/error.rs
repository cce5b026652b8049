use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("invalid response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("login rejected: {0}")]
    LoginRejected(String),
}

/// How a fetch reacts when the backend cannot supply a usable payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and substitute the payload type's default value.
    Fallback,
    /// Hand transport and decode failures back so the caller can raise a
    /// toast. A non-2xx answer still yields the default payload.
    Surface,
}
