//! Strategy bookkeeping: cash, net positions and market-data subscriptions
//!
//! None of these operations fail. A contract without an entry has a
//! position of zero, and subscribing twice or unsubscribing something that
//! was never subscribed does nothing.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use super::contract::Contract;

/// Aggregate owning a strategy's positions and subscriptions
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    strategy_id: String,
    name: String,
    cash: Decimal,
    value: Decimal,
    position: HashMap<Contract, Decimal>,
    subscribed_data: Vec<Contract>,
    log: String,
}

impl Strategy {
    pub fn new(strategy_id: impl Into<String>, name: impl Into<String>, cash: Decimal) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            name: name.into(),
            cash,
            value: Decimal::ZERO,
            position: HashMap::new(),
            subscribed_data: Vec::new(),
            log: String::new(),
        }
    }

    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    /// Seed positions, e.g. from a restored snapshot
    ///
    /// Entries are taken as given; only [`Strategy::update_position`]
    /// prunes non-positive quantities.
    pub fn with_positions(mut self, position: HashMap<Contract, Decimal>) -> Self {
        self.position = position;
        self
    }

    /// Seed subscriptions; duplicates are dropped, first occurrence wins
    pub fn with_subscriptions(mut self, contracts: impl IntoIterator<Item = Contract>) -> Self {
        self.subscribed_data.clear();
        for contract in contracts {
            self.subscribe_data(contract);
        }
        self
    }

    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = log.into();
        self
    }

    pub fn strategy_id(&self) -> &str {
        &self.strategy_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn positions(&self) -> &HashMap<Contract, Decimal> {
        &self.position
    }

    /// Net quantity held in `contract`, zero when there is no entry
    pub fn position_of(&self, contract: &Contract) -> Decimal {
        self.position.get(contract).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn subscribed_data(&self) -> &[Contract] {
        &self.subscribed_data
    }

    pub fn is_subscribed(&self, contract: &Contract) -> bool {
        self.subscribed_data.contains(contract)
    }

    /// True if any contract is held in a strictly positive quantity
    pub fn has_position(&self) -> bool {
        self.position.values().any(|qty| *qty > Decimal::ZERO)
    }

    /// Add `delta` to the position in `contract`
    ///
    /// A result at or below zero removes the entry; short exposure is not
    /// tracked.
    pub fn update_position(&mut self, contract: &Contract, delta: Decimal) {
        let new_qty = self.position_of(contract) + delta;

        if new_qty <= Decimal::ZERO {
            self.position.remove(contract);
            debug!(strategy = %self.strategy_id, %contract, "position closed");
        } else {
            self.position.insert(contract.clone(), new_qty);
            debug!(strategy = %self.strategy_id, %contract, qty = %new_qty, "position updated");
        }
    }

    /// Close the position in `contract` if it is positive
    pub fn close_position(&mut self, contract: &Contract) {
        let qty = self.position_of(contract);
        if qty <= Decimal::ZERO {
            return;
        }
        self.update_position(contract, -qty);
    }

    /// Close every positive position, leaving other entries alone
    pub fn close_all_position(&mut self) {
        let open: Vec<Contract> = self
            .position
            .iter()
            .filter(|(_, qty)| **qty > Decimal::ZERO)
            .map(|(contract, _)| contract.clone())
            .collect();

        for contract in &open {
            self.close_position(contract);
        }
    }

    pub fn subscribe_data(&mut self, contract: Contract) {
        if !self.is_subscribed(&contract) {
            debug!(strategy = %self.strategy_id, %contract, "subscribed");
            self.subscribed_data.push(contract);
        }
    }

    pub fn unsubscribe_data(&mut self, contract: &Contract) {
        if let Some(idx) = self.subscribed_data.iter().position(|c| c == contract) {
            self.subscribed_data.remove(idx);
            debug!(strategy = %self.strategy_id, %contract, "unsubscribed");
        }
    }
}
