use thiserror::Error;

/// Failures surfaced by the verification backend boundary.
///
/// None of these reach callers of the gateway; the orchestrator collapses
/// them into an opaque 500 and keeps the detail in server-side logs.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credentials or endpoint were missing or malformed.
    #[error("bad client configuration: {0}")]
    Config(String),

    /// Network or protocol failure reaching the backend.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend reachable but reported an application-level error.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend responded with a body that does not decode as a
    /// verdict.
    #[error("malformed verdict response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }
}
