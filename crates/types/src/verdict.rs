//! Verdict structures returned by the verification backend.
//!
//! Beyond the discriminants needed for classification the verdict is
//! opaque: unknown fields are captured in flatten maps so the structure
//! round-trips to callers without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Workflow state reported for a verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Blocked,
    Complete,
    Failed,
    /// Unrecognized discriminant; classified as undetermined downstream.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Decision reported for a verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationOutcome {
    Approved,
    Denied,
    Pending,
    Error,
    /// Unrecognized discriminant; classified as undetermined downstream.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Verification record inside a verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: VerificationStatus,

    #[serde(default)]
    pub outcome: VerificationOutcome,

    /// Frontend challenge payload (MFA, KYC and the like), passed through
    /// opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_data: Option<Value>,

    /// Any further backend fields, preserved for passthrough.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One error entry reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Verdict returned by the backend for one checkpoint call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointVerdict {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BackendErrorDetail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,

    /// Any further backend fields, preserved for passthrough.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
