//! Structures dispatched to the verification backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event record sent to the backend, enriched with the caller's network
/// origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEvent {
    /// Network origin of the end client, empty when unknown.
    pub ip: String,

    /// Opaque payload carried through unchanged.
    pub data: Map<String, Value>,
}

/// Checkpoint evaluation request in the backend's wire format.
///
/// Owned by the orchestrator for the duration of a single call and not
/// retained afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub checkpoint_name: String,

    pub event: CheckpointEvent,

    pub source_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Id of the pending verification this submission resumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_verification_id: Option<String>,

    /// Reserved for protocol extensions; always absent today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Payload of a tracking event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    pub ip: String,

    pub data: Map<String, Value>,
}

/// Tracking submission in the backend's wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub event: TrackEvent,

    pub source_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
