//! Client boundary to the external verification backend.

mod api;
mod error;
mod http;

#[cfg(any(test, feature = "test_utils"))]
pub use api::MockVerificationApi;
pub use api::VerificationApi;
pub use error::ClientError;
pub use http::HttpVerificationClient;
