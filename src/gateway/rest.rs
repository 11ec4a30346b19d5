//! REST transport for the trading gateway

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::messages::{Endpoint, GatewayResponse};
use crate::common::errors::{ClientError, Result, ValidationError};
use crate::common::traits::Gateway;
use crate::config::types::GatewayConfig;

/// Default connect timeout (3.05 s)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(3050);
/// Default total request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST API client for the trading gateway
#[derive(Debug, Clone)]
pub struct GatewayRestClient {
    /// HTTP client
    client: Client,
    /// Base URL every endpoint path is appended to
    base_url: Url,
}

impl GatewayRestClient {
    /// Create a new REST client with the default timeouts
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new REST client with custom timeouts
    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "gateway URL cannot be a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Create a REST client from the gateway section of the config
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::with_timeouts(
            &config.base_url,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL, percent-encoding IDs
    ///
    /// `.` and `..` are rejected: `url` drops them as dot segments, which
    /// would retarget the request at the parent collection.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url> {
        let segments = endpoint.path_segments();
        if segments.iter().any(|s| is_dot_segment(s)) {
            return Err(ValidationError::DotSegmentId("id").into());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Configuration(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Gateway for GatewayRestClient {
    #[instrument(skip(self, payload))]
    async fn send(&self, endpoint: Endpoint, payload: Option<Value>) -> Result<GatewayResponse> {
        let url = self.endpoint_url(&endpoint)?;
        debug!("Sending {} to: {}", endpoint.method(), url);

        let mut request = self.client.request(endpoint.method(), url);
        if let Some(body) = &payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                ClientError::InvalidResponse(format!(
                    "Server returned status {} with non-JSON body: {}",
                    status, e
                ))
            })?
        };

        let response = GatewayResponse::new(status, body);
        if !response.is_success() {
            warn!(status, %endpoint, "Gateway returned non-success status");
        }

        Ok(response)
    }

    fn gateway_name(&self) -> &'static str {
        "REST"
    }
}

/// Path segments that URL normalization would collapse
pub(crate) fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}
