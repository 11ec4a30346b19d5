//! Closed vocabularies shared by contracts, orders and gateway payloads
//!
//! Every type parses from raw caller text (trimmed, case-insensitive) and
//! serializes as the wire code the backend expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// Security type of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecType {
    #[serde(rename = "STK")]
    Stock,
    #[serde(rename = "OPT")]
    Option,
    #[serde(rename = "FUT")]
    Future,
}

impl SecType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecType::Stock => "STK",
            SecType::Option => "OPT",
            SecType::Future => "FUT",
        }
    }
}

impl fmt::Display for SecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STK" => Ok(SecType::Stock),
            "OPT" => Ok(SecType::Option),
            "FUT" => Ok(SecType::Future),
            other => Err(ValidationError::InvalidSecType(other.to_string())),
        }
    }
}

/// Option right: call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Right {
    #[serde(rename = "C")]
    Call,
    #[serde(rename = "P")]
    Put,
}

impl Right {
    pub fn as_str(&self) -> &'static str {
        match self {
            Right::Call => "C",
            Right::Put => "P",
        }
    }
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Right {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(Right::Call),
            "P" => Ok(Right::Put),
            other => Err(ValidationError::InvalidRight(other.to_string())),
        }
    }
}

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(ValidationError::InvalidSide),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "MKT")]
    Market,
    #[serde(rename = "LMT")]
    Limit,
    #[serde(rename = "STP")]
    Stop,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MKT",
            OrderType::Limit => "LMT",
            OrderType::Stop => "STP",
        }
    }

    /// Limit and stop orders carry a trigger/limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::Stop)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MKT" => Ok(OrderType::Market),
            "LMT" => Ok(OrderType::Limit),
            "STP" => Ok(OrderType::Stop),
            _ => Err(ValidationError::InvalidOrderType),
        }
    }
}
