//! Trait definitions for the trading backend seam

use async_trait::async_trait;
use serde_json::Value;

use super::errors::Result;
use crate::gateway::messages::{Endpoint, GatewayResponse};

/// Transport to the trading backend
///
/// Implementations send an already-validated payload to a logical endpoint
/// and hand back whatever status and body the backend produced. Non-2xx
/// answers are not errors at this layer; only failing to talk to the
/// backend at all is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Send `payload` (if any) to `endpoint`
    async fn send(&self, endpoint: Endpoint, payload: Option<Value>) -> Result<GatewayResponse>;

    /// Name used in logs
    fn gateway_name(&self) -> &'static str;
}
