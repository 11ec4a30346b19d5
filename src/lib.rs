//! TradingGatewayClient Library
//!
//! Client-side domain layer for a trading backend: validated instrument
//! contracts and orders, strategy position/subscription bookkeeping, and a
//! REST gateway that carries validated payloads to the backend.

pub mod common;
pub mod config;
pub mod gateway;
pub mod models;

// Re-export commonly used types
pub use common::errors::{ClientError, Result, ValidationError};
pub use common::traits::Gateway;
pub use common::types::{OrderType, Right, SecType, Side};
pub use config::types::AppConfig;
pub use gateway::client::TradingClient;
pub use gateway::messages::{Endpoint, GatewayResponse};
pub use gateway::rest::GatewayRestClient;
pub use models::{Contract, ContractBuilder, Order, OrderBuilder, Strategy};
