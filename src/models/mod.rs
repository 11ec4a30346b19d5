//! Domain core: validated contracts and orders, and strategy bookkeeping
//!
//! Contracts and orders reject malformed input at construction with a
//! [`ValidationError`](crate::common::errors::ValidationError). Strategy
//! bookkeeping never fails.

pub mod contract;
pub mod order;
pub mod strategy;

pub use contract::{Contract, ContractBuilder};
pub use order::{Order, OrderBuilder};
pub use strategy::Strategy;
