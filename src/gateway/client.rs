//! High-level trading client combining the core entities with a gateway

use tracing::{info, instrument};

use super::messages::{
    DataSubscriptionRequest, Endpoint, GatewayResponse, PlaceOrderRequest,
    RegisterStrategyRequest,
};
use super::rest::{is_dot_segment, GatewayRestClient};
use crate::common::errors::{Result, ValidationError};
use crate::common::traits::Gateway;
use crate::config::types::GatewayConfig;
use crate::models::{Contract, Order, Strategy};

/// Trading client for orders, market-data subscriptions and strategies
///
/// Responses are returned as status/body pairs without interpretation,
/// except for market-data subscriptions, whose success is mirrored into the
/// strategy's subscription list.
pub struct TradingClient<G = GatewayRestClient> {
    gateway: G,
}

impl TradingClient<GatewayRestClient> {
    /// Create a client talking REST to the configured gateway
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::new(GatewayRestClient::from_config(config)?))
    }
}

impl<G: Gateway> TradingClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Get a reference to the underlying gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Submit an order; it is revalidated before anything is sent
    #[instrument(skip(self, order), fields(order_id = %order.order_id()))]
    pub async fn place_order(&self, order: &Order) -> Result<GatewayResponse> {
        order.revalidate()?;
        let payload = serde_json::to_value(PlaceOrderRequest::from(order))?;

        info!(
            contract = %order.contract(),
            side = %order.side(),
            order_type = %order.order_type(),
            qty = %order.qty(),
            "Placing order"
        );
        self.gateway.send(Endpoint::PlaceOrder, Some(payload)).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> Result<GatewayResponse> {
        let order_id = require("orderID", order_id)?;
        self.gateway.send(Endpoint::CancelOrder(order_id), None).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<GatewayResponse> {
        let order_id = require("orderID", order_id)?;
        self.gateway.send(Endpoint::GetOrder(order_id), None).await
    }

    // ========================================================================
    // Market data
    // ========================================================================

    /// Subscribe `strategy` to live data for `contract`
    ///
    /// The strategy records the subscription only when the gateway answers
    /// with a success status.
    #[instrument(skip(self, strategy, contract), fields(strategy = %strategy.strategy_id(), %contract))]
    pub async fn subscribe_market_data(
        &self,
        strategy: &mut Strategy,
        contract: Contract,
    ) -> Result<GatewayResponse> {
        let payload = serde_json::to_value(DataSubscriptionRequest::new(
            strategy.strategy_id(),
            &contract,
        ))?;
        let response = self
            .gateway
            .send(Endpoint::SubscribeMarketData, Some(payload))
            .await?;

        if response.is_success() {
            strategy.subscribe_data(contract);
        }
        Ok(response)
    }

    /// Unsubscribe `strategy` from live data for `contract`
    #[instrument(skip(self, strategy, contract), fields(strategy = %strategy.strategy_id(), %contract))]
    pub async fn unsubscribe_market_data(
        &self,
        strategy: &mut Strategy,
        contract: &Contract,
    ) -> Result<GatewayResponse> {
        let payload = serde_json::to_value(DataSubscriptionRequest::new(
            strategy.strategy_id(),
            contract,
        ))?;
        let response = self
            .gateway
            .send(Endpoint::UnsubscribeMarketData, Some(payload))
            .await?;

        if response.is_success() {
            strategy.unsubscribe_data(contract);
        }
        Ok(response)
    }

    // ========================================================================
    // Strategies
    // ========================================================================

    #[instrument(skip(self, strategy), fields(strategy = %strategy.strategy_id()))]
    pub async fn register_strategy(&self, strategy: &Strategy) -> Result<GatewayResponse> {
        require("strategyID", strategy.strategy_id())?;
        let payload = serde_json::to_value(RegisterStrategyRequest::from(strategy))?;
        info!(name = strategy.name(), cash = %strategy.cash(), "Registering strategy");
        self.gateway.send(Endpoint::RegisterStrategy, Some(payload)).await
    }

    #[instrument(skip(self))]
    pub async fn unregister_strategy(&self, strategy_id: &str) -> Result<GatewayResponse> {
        let strategy_id = require("strategyID", strategy_id)?;
        self.gateway
            .send(Endpoint::UnregisterStrategy(strategy_id), None)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_strategy_info(&self, strategy_id: &str) -> Result<GatewayResponse> {
        let strategy_id = require("strategyID", strategy_id)?;
        self.gateway.send(Endpoint::GetStrategy(strategy_id), None).await
    }

    // ========================================================================
    // System
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_system_health(&self) -> Result<GatewayResponse> {
        self.gateway.send(Endpoint::SystemStatus, None).await
    }
}

fn require(field: &'static str, value: &str) -> std::result::Result<String, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else if is_dot_segment(value) {
        Err(ValidationError::DotSegmentId(field))
    } else {
        Ok(value.to_string())
    }
}
