//! Verdict-to-transport mapping.

use axum::{http::StatusCode, Json};
use trustpoint_types::{CheckpointVerdict, Outcome};

/// Maps a backend verdict onto the HTTP contract.
///
/// The body is always the full verdict; only the status code encodes the
/// outcome category. Undetermined verdicts are a server-side failure,
/// never a client error.
pub fn verdict_response(verdict: CheckpointVerdict) -> (StatusCode, Json<CheckpointVerdict>) {
    let status = match verdict.outcome() {
        Outcome::Allowed => StatusCode::OK,
        Outcome::Running => StatusCode::ACCEPTED,
        Outcome::Denied => StatusCode::FORBIDDEN,
        Outcome::Undetermined => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(verdict))
}
