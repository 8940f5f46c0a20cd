//! HTTP surface for the trustpoint checkpoint gateway.
//!
//! One linear flow per request: validate, resolve the caller origin,
//! enrich the event, dispatch to the verification backend, classify the
//! verdict and map it onto the HTTP contract. The backend call is the
//! only suspension point.

mod enrich;
mod origin;
mod respond;
mod routes;
mod state;

pub use enrich::{build_verify_request, enrich_event};
pub use origin::caller_origin;
pub use respond::verdict_response;
pub use routes::router;
pub use state::AppState;
