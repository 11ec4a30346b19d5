//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Entity failed construction-time validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Configuration(format!("invalid gateway URL: {}", err))
    }
}

/// A contract or order violated one of its construction rules.
///
/// Raised synchronously by the validating constructors; an entity that
/// produced one of these never exists, so it can never reach the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid secType: {0}")]
    InvalidSecType(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    /// `.` and `..` would be collapsed out of the request path
    #[error("{0} must not be '.' or '..'")]
    DotSegmentId(&'static str),

    /// Stocks carry no derivative metadata
    #[error("STK must not have {0}")]
    StockDerivativeField(&'static str),

    #[error("OPT requires lastTradeDateOrContractMonth (YYYYMMDD)")]
    OptionExpiry,

    #[error("OPT requires strike")]
    OptionStrike,

    #[error("OPT requires right = 'C' or 'P'")]
    OptionRight,

    #[error("FUT requires lastTradeDateOrContractMonth (YYYYMM)")]
    FutureExpiry,

    #[error("FUT must not have {0}")]
    FutureOptionField(&'static str),

    #[error("invalid right: {0}")]
    InvalidRight(String),

    #[error("qty must be a positive number")]
    NonPositiveQty,

    #[error("qtyFilled / qtyUnfilled cannot be negative")]
    NegativeFill,

    #[error("qtyFilled cannot exceed qty")]
    OverFilled,

    #[error("qtyFilled + qtyUnfilled must equal qty")]
    FillMismatch,

    #[error("side must be BUY or SELL")]
    InvalidSide,

    #[error("orderType must be MKT, LMT, or STP")]
    InvalidOrderType,

    #[error("Market orders must not have a price")]
    MarketOrderPrice,

    #[error("{0} orders require a positive price")]
    MissingPrice(&'static str),

    /// Fill applied to an order that is no longer working
    #[error("order {0} is not open")]
    OrderClosed(String),
}
