//! Inbound request structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A required request field that was absent or blank.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Checkpoint evaluation request as submitted by a protected service's
/// frontend.
///
/// Decoding is lenient (absent fields become empty) so that malformed
/// requests surface through [`CheckpointRequest::validate`] rather than a
/// framework-level decode rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointRequest {
    /// Name of the policy checkpoint to evaluate.
    #[serde(default)]
    pub checkpoint_name: String,

    /// Opaque event payload, forwarded to the backend verbatim.
    #[serde(default)]
    pub payload: Map<String, Value>,

    /// Token identifying the originating device/session context. Obtained
    /// from the backend's client SDK and short-lived.
    #[serde(default)]
    pub source_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Id of a prior pending verification being resumed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_id: Option<String>,
}

impl CheckpointRequest {
    /// Checks the fields without which the request cannot be dispatched.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.checkpoint_name.trim().is_empty() {
            return Err(RequestError::MissingField("checkpointName"));
        }
        if self.source_token.trim().is_empty() {
            return Err(RequestError::MissingField("sourceToken"));
        }
        Ok(())
    }
}

/// Tracking event request for the `/event` route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Name of the event to record.
    #[serde(default)]
    pub event_name: String,

    #[serde(default)]
    pub payload: Map<String, Value>,

    #[serde(default)]
    pub source_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl EventRequest {
    /// Checks the fields without which the event cannot be dispatched.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.event_name.trim().is_empty() {
            return Err(RequestError::MissingField("eventName"));
        }
        if self.source_token.trim().is_empty() {
            return Err(RequestError::MissingField("sourceToken"));
        }
        Ok(())
    }
}

/// Acknowledgement body returned by the `/event` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAck {
    pub success: bool,
}
