//! Route handlers and router assembly.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, warn};
use trustpoint_types::{CheckpointRequest, EventAck, EventRequest, TrackEvent, TrackRequest};

use crate::{
    enrich::{build_verify_request, enrich_event},
    origin::caller_origin,
    respond::verdict_response,
    state::AppState,
};

/// Builds the gateway router with all routes and the CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/checkpoint", post(handle_checkpoint))
        .route("/event", post(handle_event))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// The checkpoint orchestrator: validate, enrich, dispatch, classify,
/// respond. One pass per request; every failure along the path collapses
/// into an opaque 500 while the detail stays in server-side logs.
async fn handle_checkpoint(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<CheckpointRequest>,
) -> Response {
    if let Err(err) = req.validate() {
        warn!(%err, "rejecting checkpoint request");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let Some(verifier) = state.verifier() else {
        error!("verification backend not configured, failing checkpoint");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let origin = caller_origin(&headers, Some(peer.ip()));
    let event = enrich_event(&req, &origin);
    let request = build_verify_request(req, event);

    match verifier.submit_checkpoint(&request).await {
        Ok(verdict) => {
            info!(
                checkpoint = %request.checkpoint_name,
                outcome = ?verdict.outcome(),
                "checkpoint evaluated"
            );
            verdict_response(verdict).into_response()
        }
        Err(err) => {
            // Error detail stays on this side of the trust boundary.
            error!(%err, checkpoint = %request.checkpoint_name, "checkpoint dispatch failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn handle_event(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<EventRequest>,
) -> Response {
    if let Err(err) = req.validate() {
        warn!(%err, "rejecting event request");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let Some(verifier) = state.verifier() else {
        error!("verification backend not configured, failing event");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EventAck { success: false }),
        )
            .into_response();
    };

    let origin = caller_origin(&headers, Some(peer.ip()));
    let request = TrackRequest {
        event: TrackEvent {
            event_type: req.event_name,
            ip: origin,
            data: req.payload,
        },
        source_token: req.source_token,
        session_id: req.session_id,
        user_id: req.user_id,
    };

    match verifier.track_event(&request).await {
        Ok(()) => (StatusCode::OK, Json(EventAck { success: true })).into_response(),
        Err(err) => {
            error!(%err, event = %request.event.event_type, "event dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EventAck { success: false }),
            )
                .into_response()
        }
    }
}

/// CORS handling for the configured origin.
///
/// Preflight requests are answered directly; all other responses get the
/// allow headers appended. With no configured origin the middleware is a
/// passthrough.
async fn cors(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(resp.headers_mut(), state.cors_origin());
        return resp;
    }

    let mut resp = next.run(req).await;
    apply_cors_headers(resp.headers_mut(), state.cors_origin());
    resp
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<&str>) {
    let Some(origin) = origin else { return };
    let Ok(value) = HeaderValue::from_str(origin) else {
        warn!(%origin, "configured cors origin is not a valid header value");
        return;
    };
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use trustpoint_client::{ClientError, MockVerificationApi};
    use trustpoint_types::CheckpointVerdict;

    use super::*;

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo("198.51.100.2:40000".parse().unwrap())
    }

    fn state_with(mock: MockVerificationApi) -> AppState {
        AppState::new(Some(Arc::new(mock)), None)
    }

    fn checkpoint_request() -> CheckpointRequest {
        serde_json::from_value(json!({
            "checkpointName": "LOGIN",
            "sourceToken": "tok1",
            "payload": { "email": "a@b.com" },
        }))
        .expect("request fixture should decode")
    }

    fn verdict(status: &str, outcome: &str) -> CheckpointVerdict {
        serde_json::from_value(json!({
            "success": true,
            "verification": { "id": "v-123", "status": status, "outcome": outcome },
        }))
        .expect("verdict fixture should decode")
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    async fn body_is_empty(resp: Response) -> bool {
        to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should collect")
            .is_empty()
    }

    /// A real transport-level reqwest error, produced without any
    /// network traffic by handing the client an unparsable URL.
    async fn transport_error() -> ClientError {
        ClientError::Transport(
            reqwest::Client::new()
                .get("http://")
                .send()
                .await
                .expect_err("empty host must fail to build"),
        )
    }

    mod checkpoint_tests {
        use super::*;

        #[tokio::test]
        async fn allowed_verdict_maps_to_200_with_full_body() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .withf(|req| req.checkpoint_name == "LOGIN" && req.source_token == "tok1")
                .returning(|_| Ok(verdict("COMPLETE", "APPROVED")));

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::OK);
            let body = body_json(resp).await;
            assert_eq!(body["verification"]["outcome"], json!("APPROVED"));
        }

        #[tokio::test]
        async fn running_verdict_maps_to_202() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .returning(|_| Ok(verdict("PENDING", "PENDING")));

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::ACCEPTED);
            let body = body_json(resp).await;
            assert_eq!(body["verification"]["id"], json!("v-123"));
        }

        #[tokio::test]
        async fn denied_verdict_maps_to_403() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .returning(|_| Ok(verdict("COMPLETE", "DENIED")));

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }

        #[tokio::test]
        async fn transport_error_maps_to_500_with_empty_body() {
            let err = transport_error().await;
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .return_once(move |_| Err(err));

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body_is_empty(resp).await);
        }

        #[tokio::test]
        async fn backend_error_maps_to_500_not_4xx() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .returning(|_| Err(ClientError::Backend {
                    status: 503,
                    message: "upstream unavailable".to_owned(),
                }));

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body_is_empty(resp).await);
        }

        #[tokio::test]
        async fn missing_credentials_fail_without_dispatch() {
            // Client construction failed at startup, so there is no
            // verifier to invoke at all.
            let resp = handle_checkpoint(
                State(AppState::new(None, None)),
                peer(),
                HeaderMap::new(),
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body_is_empty(resp).await);
        }

        #[tokio::test]
        async fn blank_checkpoint_name_is_rejected_before_dispatch() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint().times(0);

            let req = CheckpointRequest {
                source_token: "tok1".to_owned(),
                ..Default::default()
            };
            let resp =
                handle_checkpoint(State(state_with(mock)), peer(), HeaderMap::new(), Json(req))
                    .await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn concurrent_requests_classify_independently() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(2)
                .returning(|req| {
                    if req.source_token == "tok-allow" {
                        Ok(verdict("COMPLETE", "APPROVED"))
                    } else {
                        Ok(verdict("COMPLETE", "DENIED"))
                    }
                });
            let state = state_with(mock);

            let mut allow_req = checkpoint_request();
            allow_req.source_token = "tok-allow".to_owned();
            let mut deny_req = checkpoint_request();
            deny_req.source_token = "tok-deny".to_owned();

            let (allow_resp, deny_resp) = tokio::join!(
                handle_checkpoint(
                    State(state.clone()),
                    peer(),
                    HeaderMap::new(),
                    Json(allow_req),
                ),
                handle_checkpoint(State(state), peer(), HeaderMap::new(), Json(deny_req)),
            );

            assert_eq!(allow_resp.status(), StatusCode::OK);
            assert_eq!(deny_resp.status(), StatusCode::FORBIDDEN);
        }

        #[tokio::test]
        async fn forwarded_origin_reaches_the_backend_event() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .withf(|req| req.event.ip == "203.0.113.7" && req.event.data["email"] == "a@b.com")
                .returning(|_| Ok(verdict("COMPLETE", "APPROVED")));

            let mut headers = HeaderMap::new();
            headers.insert(
                "x-forwarded-for",
                HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
            );

            let resp = handle_checkpoint(
                State(state_with(mock)),
                peer(),
                headers,
                Json(checkpoint_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    mod event_tests {
        use super::*;

        fn event_request() -> EventRequest {
            serde_json::from_value(json!({
                "eventName": "SIGNUP",
                "sourceToken": "tok1",
                "payload": { "plan": "pro" },
            }))
            .expect("event fixture should decode")
        }

        #[tokio::test]
        async fn tracked_event_acks_success() {
            let mut mock = MockVerificationApi::new();
            mock.expect_track_event()
                .times(1)
                .withf(|req| req.event.event_type == "SIGNUP" && req.source_token == "tok1")
                .returning(|_| Ok(()));

            let resp = handle_event(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(event_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::OK);
            let body = body_json(resp).await;
            assert_eq!(body, json!({ "success": true }));
        }

        #[tokio::test]
        async fn track_failure_maps_to_500_ack() {
            let mut mock = MockVerificationApi::new();
            mock.expect_track_event().times(1).returning(|_| {
                Err(ClientError::Backend {
                    status: 500,
                    message: "boom".to_owned(),
                })
            });

            let resp = handle_event(
                State(state_with(mock)),
                peer(),
                HeaderMap::new(),
                Json(event_request()),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = body_json(resp).await;
            assert_eq!(body, json!({ "success": false }));
        }

        #[tokio::test]
        async fn blank_event_name_is_rejected() {
            let mut mock = MockVerificationApi::new();
            mock.expect_track_event().times(0);

            let req = EventRequest {
                source_token: "tok1".to_owned(),
                ..Default::default()
            };
            let resp =
                handle_event(State(state_with(mock)), peer(), HeaderMap::new(), Json(req)).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    mod router_tests {
        // The generic request type, not the extractor alias, so that
        // `Request::builder()` resolves.
        use axum::http::Request;

        use super::*;

        fn cors_state(mock: MockVerificationApi, origin: &str) -> AppState {
            AppState::new(Some(Arc::new(mock)), Some(origin.to_owned()))
        }

        fn with_peer(mut req: Request<Body>) -> Request<Body> {
            req.extensions_mut().insert(peer());
            req
        }

        #[tokio::test]
        async fn healthz_responds_ok() {
            let app = router(AppState::new(None, None));
            let req = with_peer(
                Request::builder()
                    .method(Method::GET)
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            );

            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn preflight_is_answered_with_allow_headers() {
            let app = router(cors_state(
                MockVerificationApi::new(),
                "https://shop.example.com",
            ));
            let req = with_peer(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/checkpoint")
                    .body(Body::empty())
                    .unwrap(),
            );

            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
            assert_eq!(
                resp.headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .unwrap(),
                "https://shop.example.com"
            );
        }

        #[tokio::test]
        async fn checkpoint_response_carries_cors_origin() {
            let mut mock = MockVerificationApi::new();
            mock.expect_submit_checkpoint()
                .times(1)
                .returning(|_| Ok(verdict("COMPLETE", "APPROVED")));
            let app = router(cors_state(mock, "https://shop.example.com"));

            let req = with_peer(
                Request::builder()
                    .method(Method::POST)
                    .uri("/checkpoint")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&checkpoint_request()).unwrap(),
                    ))
                    .unwrap(),
            );

            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .unwrap(),
                "https://shop.example.com"
            );
        }

        #[tokio::test]
        async fn responses_without_configured_origin_have_no_cors_headers() {
            let app = router(AppState::new(None, None));
            let req = with_peer(
                Request::builder()
                    .method(Method::GET)
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            );

            let resp = app.oneshot(req).await.unwrap();
            assert!(resp
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none());
        }
    }
}
