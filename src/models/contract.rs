//! Tradeable instrument description
//!
//! A [`Contract`] is only ever produced by [`ContractBuilder::build`], which
//! normalizes the raw text fields once and then validates the result. The
//! fields are private, so a constructed contract can never change; equality
//! and hashing cover every normalized field, which makes contracts usable as
//! position keys.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::common::errors::ValidationError;
use crate::common::types::{Right, SecType};

/// Validated, immutable instrument description
///
/// Serializes sparsely: empty strings and absent values are omitted, since
/// the backend treats a missing key differently from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    sec_type: SecType,
    symbol: String,
    exchange: String,
    currency: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    last_trade_date_or_contract_month: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    strike: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<Right>,
    #[serde(skip_serializing_if = "String::is_empty")]
    multiplier: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    local_symbol: String,
}

impl Contract {
    /// Start a contract from its four mandatory raw fields
    pub fn builder(
        sec_type: impl Into<String>,
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> ContractBuilder {
        ContractBuilder {
            sec_type: sec_type.into(),
            symbol: symbol.into(),
            exchange: exchange.into(),
            currency: currency.into(),
            ..ContractBuilder::default()
        }
    }

    /// Build a stock contract
    pub fn stock(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder("STK", symbol, exchange, currency).build()
    }

    /// Build an option contract expiring on `expiry` (YYYYMMDD)
    pub fn option(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
        expiry: impl Into<String>,
        strike: Decimal,
        right: Right,
    ) -> Result<Self, ValidationError> {
        Self::builder("OPT", symbol, exchange, currency)
            .last_trade_date_or_contract_month(expiry)
            .strike(strike)
            .right(right.as_str())
            .build()
    }

    /// Build a futures contract for `contract_month` (YYYYMM)
    pub fn future(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
        contract_month: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder("FUT", symbol, exchange, currency)
            .last_trade_date_or_contract_month(contract_month)
            .build()
    }

    pub fn sec_type(&self) -> SecType {
        self.sec_type
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn last_trade_date_or_contract_month(&self) -> &str {
        &self.last_trade_date_or_contract_month
    }

    pub fn strike(&self) -> Option<Decimal> {
        self.strike
    }

    pub fn right(&self) -> Option<Right> {
        self.right
    }

    pub fn multiplier(&self) -> &str {
        &self.multiplier
    }

    pub fn local_symbol(&self) -> &str {
        &self.local_symbol
    }

    /// Sparse JSON object of the non-empty fields, used in outbound payloads
    pub fn to_payload(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sec_type, self.symbol)?;
        if !self.last_trade_date_or_contract_month.is_empty() {
            write!(f, " {}", self.last_trade_date_or_contract_month)?;
        }
        if let Some(strike) = self.strike {
            write!(f, " {}", strike)?;
        }
        if let Some(right) = self.right {
            write!(f, " {}", right)?;
        }
        write!(f, " @{} {}", self.exchange, self.currency)
    }
}

/// Raw, unvalidated contract fields
///
/// Nothing is checked until [`ContractBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ContractBuilder {
    sec_type: String,
    symbol: String,
    exchange: String,
    currency: String,
    last_trade_date_or_contract_month: String,
    strike: Option<Decimal>,
    right: String,
    multiplier: String,
    local_symbol: String,
}

impl ContractBuilder {
    /// Expiry: YYYYMMDD for options, YYYYMM for futures
    pub fn last_trade_date_or_contract_month(mut self, value: impl Into<String>) -> Self {
        self.last_trade_date_or_contract_month = value.into();
        self
    }

    pub fn strike(mut self, strike: Decimal) -> Self {
        self.strike = Some(strike);
        self
    }

    pub fn right(mut self, right: impl Into<String>) -> Self {
        self.right = right.into();
        self
    }

    pub fn multiplier(mut self, multiplier: impl Into<String>) -> Self {
        self.multiplier = multiplier.into();
        self
    }

    pub fn local_symbol(mut self, local_symbol: impl Into<String>) -> Self {
        self.local_symbol = local_symbol.into();
        self
    }

    /// Normalize every field, then validate the normalized values
    pub fn build(self) -> Result<Contract, ValidationError> {
        let sec_type: SecType = self.sec_type.parse()?;

        let symbol = upper(&self.symbol);
        let exchange = upper(&self.exchange);
        let currency = upper(&self.currency);
        let expiry = self.last_trade_date_or_contract_month.trim().to_string();
        let right = upper(&self.right);
        let multiplier = self.multiplier.trim().to_string();
        let local_symbol = upper(&self.local_symbol);

        if symbol.is_empty() {
            return Err(ValidationError::MissingField("Symbol"));
        }
        if exchange.is_empty() {
            return Err(ValidationError::MissingField("Exchange"));
        }
        if currency.is_empty() {
            return Err(ValidationError::MissingField("Currency"));
        }

        let right = match sec_type {
            SecType::Stock => {
                if !expiry.is_empty() {
                    return Err(ValidationError::StockDerivativeField(
                        "lastTradeDateOrContractMonth",
                    ));
                }
                if self.strike.is_some() {
                    return Err(ValidationError::StockDerivativeField("strike"));
                }
                if !right.is_empty() {
                    return Err(ValidationError::StockDerivativeField("right"));
                }
                if !multiplier.is_empty() {
                    return Err(ValidationError::StockDerivativeField("multiplier"));
                }
                if !local_symbol.is_empty() {
                    return Err(ValidationError::StockDerivativeField("localSymbol"));
                }
                None
            }
            SecType::Option => {
                if !is_digits(&expiry, 8) {
                    return Err(ValidationError::OptionExpiry);
                }
                if self.strike.is_none() {
                    return Err(ValidationError::OptionStrike);
                }
                // multiplier and localSymbol are optional for options
                Some(
                    right
                        .parse::<Right>()
                        .map_err(|_| ValidationError::OptionRight)?,
                )
            }
            SecType::Future => {
                if !is_digits(&expiry, 6) {
                    return Err(ValidationError::FutureExpiry);
                }
                if self.strike.is_some() {
                    return Err(ValidationError::FutureOptionField("strike"));
                }
                if !right.is_empty() {
                    return Err(ValidationError::FutureOptionField("right"));
                }
                None
            }
        };

        Ok(Contract {
            sec_type,
            symbol,
            exchange,
            currency,
            last_trade_date_or_contract_month: expiry,
            strike: self.strike,
            right,
            multiplier,
            local_symbol,
        })
    }
}

fn upper(value: &str) -> String {
    value.trim().to_uppercase()
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
