use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;
use trustpoint_config::BackendConfig;
use trustpoint_types::{CheckpointVerdict, TrackRequest, VerifyRequest};

use crate::{api::VerificationApi, error::ClientError};

/// Request header carrying the backend secret key.
const SECRET_KEY_HEADER: &str = "x-trustpoint-secret-key";

/// Checkpoint evaluation endpoint, relative to the configured base URL.
const CHECKPOINT_PATH: &str = "v1/checkpoint";

/// Event tracking endpoint.
const TRACK_PATH: &str = "v1/track";

/// HTTP client for the verification backend.
///
/// Thread-safe and cheap to clone; constructed once at startup from the
/// credential pair and shared across requests for connection reuse.
#[derive(Debug, Clone)]
pub struct HttpVerificationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpVerificationClient {
    /// Builds a client from backend configuration.
    ///
    /// Both the base URL and the secret key must be present and
    /// non-blank, otherwise construction fails with
    /// [`ClientError::Config`].
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let base_url = sanitize(config.api_url.as_deref())
            .ok_or_else(|| ClientError::config("missing verification backend api url"))?;
        let secret_key = sanitize(config.secret_key.as_deref())
            .ok_or_else(|| ClientError::config("missing verification backend secret key"))?;

        let mut secret = HeaderValue::from_str(&secret_key)
            .map_err(|_| ClientError::config("secret key contains non-header characters"))?;
        secret.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_KEY_HEADER, secret);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl VerificationApi for HttpVerificationClient {
    async fn submit_checkpoint(
        &self,
        req: &VerifyRequest,
    ) -> Result<CheckpointVerdict, ClientError> {
        debug!(checkpoint = %req.checkpoint_name, "submitting checkpoint");
        let resp = self
            .http
            .post(self.endpoint(CHECKPOINT_PATH))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::backend(status.as_u16(), message));
        }

        resp.json::<CheckpointVerdict>()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    async fn track_event(&self, req: &TrackRequest) -> Result<(), ClientError> {
        debug!(event = %req.event.event_type, "tracking event");
        let resp = self
            .http
            .post(self.endpoint(TRACK_PATH))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::backend(status.as_u16(), message));
        }

        Ok(())
    }
}

fn sanitize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
