//! Wire types for the trading gateway
//!
//! Outbound payloads borrow from validated core entities, so a payload can
//! only be assembled from a contract/order that passed its checks. Contract
//! fields are flattened in sparsely: empty values are left out entirely.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::common::types::{OrderType, Side};
use crate::models::{Contract, Order, Strategy};

// ============================================================================
// Endpoints
// ============================================================================

/// Logical backend endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    PlaceOrder,
    CancelOrder(String),
    GetOrder(String),
    SubscribeMarketData,
    UnsubscribeMarketData,
    RegisterStrategy,
    UnregisterStrategy(String),
    GetStrategy(String),
    SystemStatus,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetOrder(_) | Endpoint::GetStrategy(_) | Endpoint::SystemStatus => {
                Method::GET
            }
            Endpoint::CancelOrder(_) | Endpoint::UnregisterStrategy(_) => Method::DELETE,
            Endpoint::PlaceOrder
            | Endpoint::SubscribeMarketData
            | Endpoint::UnsubscribeMarketData
            | Endpoint::RegisterStrategy => Method::POST,
        }
    }

    /// Unencoded path segments relative to the gateway base URL
    pub fn path_segments(&self) -> [&str; 2] {
        match self {
            Endpoint::PlaceOrder => ["orders", "place_order"],
            Endpoint::CancelOrder(id) | Endpoint::GetOrder(id) => ["orders", id.as_str()],
            Endpoint::SubscribeMarketData => ["data", "subscribe"],
            Endpoint::UnsubscribeMarketData => ["data", "unsubscribe"],
            Endpoint::RegisterStrategy => ["strategy", "register"],
            Endpoint::UnregisterStrategy(id) | Endpoint::GetStrategy(id) => ["strategy", id.as_str()],
            Endpoint::SystemStatus => ["system", "status"],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [group, item] = self.path_segments();
        write!(f, "{} /{}/{}", self.method(), group, item)
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /orders/place_order`
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest<'a> {
    #[serde(rename = "orderID")]
    pub order_id: &'a str,
    #[serde(rename = "strategyID")]
    pub strategy_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub qty: Decimal,
    pub side: Side,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub contract: &'a Contract,
}

impl<'a> From<&'a Order> for PlaceOrderRequest<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            order_id: order.order_id(),
            strategy_id: order.strategy_id(),
            qty: order.qty(),
            side: order.side(),
            order_type: order.order_type(),
            price: order.price(),
            contract: order.contract(),
        }
    }
}

/// Body of the market-data subscribe/unsubscribe endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DataSubscriptionRequest<'a> {
    #[serde(rename = "strategyID")]
    pub strategy_id: &'a str,
    #[serde(flatten)]
    pub contract: &'a Contract,
}

impl<'a> DataSubscriptionRequest<'a> {
    pub fn new(strategy_id: &'a str, contract: &'a Contract) -> Self {
        Self {
            strategy_id,
            contract,
        }
    }
}

/// Body of `POST /strategy/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterStrategyRequest<'a> {
    #[serde(rename = "strategyID")]
    pub strategy_id: &'a str,
    pub name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash: Decimal,
}

impl<'a> From<&'a Strategy> for RegisterStrategyRequest<'a> {
    fn from(strategy: &'a Strategy) -> Self {
        Self {
            strategy_id: strategy.strategy_id(),
            name: strategy.name(),
            cash: strategy.cash(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Status code and JSON body returned by the backend, uninterpreted
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_parts(self) -> (u16, Value) {
        (self.status, self.body)
    }
}
