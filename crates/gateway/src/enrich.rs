//! Event enrichment ahead of backend dispatch.

use trustpoint_types::{CheckpointEvent, CheckpointRequest, VerifyRequest};

/// Builds the enriched event dispatched to the backend.
///
/// Pure: the payload is carried through untouched and the same request
/// and origin always produce the same event.
pub fn enrich_event(req: &CheckpointRequest, origin: &str) -> CheckpointEvent {
    CheckpointEvent {
        ip: origin.to_owned(),
        data: req.payload.clone(),
    }
}

/// Assembles the backend request around an enriched event.
///
/// Routing and identity fields are copied from the inbound request
/// unchanged; the reserved options field stays absent.
pub fn build_verify_request(req: CheckpointRequest, event: CheckpointEvent) -> VerifyRequest {
    VerifyRequest {
        checkpoint_name: req.checkpoint_name,
        event,
        source_token: req.source_token,
        session_id: req.session_id,
        user_id: req.user_id,
        use_verification_id: req.verification_id,
        options: None,
    }
}
