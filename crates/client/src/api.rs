use async_trait::async_trait;
use trustpoint_types::{CheckpointVerdict, TrackRequest, VerifyRequest};

use crate::error::ClientError;

/// Boundary to the external risk-decision service.
///
/// Submitting blocks the calling task until the backend produces a
/// verdict or the transport gives up; any deadline comes from the
/// implementation, not the caller.
#[cfg_attr(any(test, feature = "test_utils"), mockall::automock)]
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// Submits a checkpoint evaluation and awaits the backend's verdict.
    async fn submit_checkpoint(
        &self,
        req: &VerifyRequest,
    ) -> Result<CheckpointVerdict, ClientError>;

    /// Records a tracking event with the backend.
    async fn track_event(&self, req: &TrackRequest) -> Result<(), ClientError>;
}
