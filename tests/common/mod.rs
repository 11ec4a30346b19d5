//! Common test utilities and fixtures

#![allow(dead_code)]

use rust_decimal_macros::dec;
use trading_gateway_client::{Contract, Order, OrderType, Right, Side, Strategy};

/// Plain TSLA stock on SMART
pub fn tsla() -> Contract {
    Contract::stock("TSLA", "SMART", "USD").expect("valid stock")
}

/// AAPL Dec-2025 150 call
pub fn aapl_call() -> Contract {
    Contract::option("AAPL", "SMART", "USD", "20251219", dec!(150.0), Right::Call)
        .expect("valid option")
}

/// E-mini S&P Dec-2025 future
pub fn es_future() -> Contract {
    Contract::future("ES", "CME", "USD", "202512").expect("valid future")
}

/// Limit buy of one TSLA share at 1.00
pub fn sample_limit_order(order_id: &str) -> Order {
    Order::builder(order_id, "1", tsla())
        .qty(dec!(1))
        .qty_filled(dec!(0))
        .qty_unfilled(dec!(0))
        .average_cost(dec!(0))
        .side(Side::Buy)
        .order_type(OrderType::Limit)
        .price(dec!(1))
        .build()
        .expect("valid order")
}

pub fn sample_strategy() -> Strategy {
    Strategy::new("1", "momentum", dec!(10000))
}

/// Sample API responses for testing
pub mod api_responses {
    use serde_json::{json, Value};

    pub fn order_submitted(order_id: &str) -> Value {
        json!({"orderID": order_id, "status": "Submitted"})
    }

    pub fn order_cancelled(order_id: &str) -> Value {
        json!({"orderID": order_id, "status": "Cancelled"})
    }

    pub fn system_ok() -> Value {
        json!({"status": "ok", "connected": true})
    }
}
