use std::{fmt, sync::Arc};

use trustpoint_client::VerificationApi;

/// Shared application state, cloned per request.
///
/// There is no mutable state here: the verifier handle and the CORS
/// origin are fixed at startup, so concurrent requests stay independent.
#[derive(Clone)]
pub struct AppState {
    verifier: Option<Arc<dyn VerificationApi>>,
    cors_origin: Option<String>,
}

impl AppState {
    /// Creates the gateway state.
    ///
    /// `verifier` is `None` when backend credentials were missing at
    /// startup; the gateway still serves, and every dispatching request
    /// fails fast with an opaque 500.
    pub fn new(verifier: Option<Arc<dyn VerificationApi>>, cors_origin: Option<String>) -> Self {
        Self {
            verifier,
            cors_origin,
        }
    }

    pub(crate) fn verifier(&self) -> Option<&Arc<dyn VerificationApi>> {
        self.verifier.as_ref()
    }

    pub(crate) fn cors_origin(&self) -> Option<&str> {
        self.cors_origin.as_deref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("verifier_configured", &self.verifier.is_some())
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}
