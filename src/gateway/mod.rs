//! Gateway module - REST transport and high-level client for the trading backend

pub mod client;
pub mod messages;
pub mod rest;

pub use client::TradingClient;
pub use rest::GatewayRestClient;
