//! Orders against a [`Contract`]
//!
//! Every observable state of an [`Order`] satisfies the same rules: the
//! builder checks them before the order exists, and each mutator checks a
//! candidate copy before committing it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::contract::Contract;
use crate::common::errors::ValidationError;
use crate::common::types::{OrderType, Side};

/// Allowed drift between `qty` and `qtyFilled + qtyUnfilled`
pub const FILL_TOLERANCE: Decimal = dec!(0.000001);

/// A validated trading instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    order_id: String,
    strategy_id: String,
    /// true while working, false once filled or cancelled
    status: bool,
    qty: Decimal,
    qty_filled: Option<Decimal>,
    qty_unfilled: Option<Decimal>,
    average_cost: Option<Decimal>,
    side: Side,
    order_type: OrderType,
    price: Option<Decimal>,
    contract: Contract,
    time_placed: DateTime<Utc>,
}

impl Order {
    pub fn builder(
        order_id: impl Into<String>,
        strategy_id: impl Into<String>,
        contract: Contract,
    ) -> OrderBuilder {
        OrderBuilder {
            order_id: order_id.into(),
            strategy_id: strategy_id.into(),
            contract,
            status: true,
            qty: None,
            qty_filled: None,
            qty_unfilled: None,
            average_cost: None,
            side: None,
            order_type: None,
            price: None,
            time_placed: None,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn strategy_id(&self) -> &str {
        &self.strategy_id
    }

    /// Whether the order is still working
    pub fn is_open(&self) -> bool {
        self.status
    }

    pub fn qty(&self) -> Decimal {
        self.qty
    }

    /// Filled quantity (zero when never reported)
    pub fn qty_filled(&self) -> Decimal {
        self.qty_filled.unwrap_or(Decimal::ZERO)
    }

    /// Unfilled quantity, derived from `qty - qtyFilled` when not reported
    pub fn qty_unfilled(&self) -> Decimal {
        effective_unfilled(self.qty, self.qty_filled(), self.qty_unfilled)
    }

    pub fn average_cost(&self) -> Option<Decimal> {
        self.average_cost
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn time_placed(&self) -> DateTime<Utc> {
        self.time_placed
    }

    /// Re-run the construction rules against the current state
    pub fn revalidate(&self) -> Result<(), ValidationError> {
        check(
            &self.order_id,
            &self.strategy_id,
            Some(self.qty),
            self.qty_filled,
            self.qty_unfilled,
            Some(self.side),
            Some(self.order_type),
            self.price,
        )
        .map(|_| ())
    }

    /// Record an execution of `fill_qty` units
    ///
    /// The order closes once nothing is left unfilled. A fill that would
    /// break the quantity rules leaves the order untouched.
    pub fn apply_fill(
        &mut self,
        fill_qty: Decimal,
        average_cost: Option<Decimal>,
    ) -> Result<(), ValidationError> {
        if !self.status {
            return Err(ValidationError::OrderClosed(self.order_id.clone()));
        }
        if fill_qty <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQty);
        }

        let mut next = self.clone();
        let filled = self.qty_filled() + fill_qty;
        next.qty_filled = Some(filled);
        next.qty_unfilled = Some(self.qty - filled);
        if average_cost.is_some() {
            next.average_cost = average_cost;
        }
        if filled == self.qty {
            next.status = false;
        }

        next.revalidate()?;
        *self = next;
        Ok(())
    }

    /// Mark the order finished without further fills
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        let mut next = self.clone();
        next.status = false;
        next.revalidate()?;
        *self = next;
        Ok(())
    }
}

/// Raw order fields awaiting validation
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    order_id: String,
    strategy_id: String,
    contract: Contract,
    status: bool,
    qty: Option<Decimal>,
    qty_filled: Option<Decimal>,
    qty_unfilled: Option<Decimal>,
    average_cost: Option<Decimal>,
    side: Option<Side>,
    order_type: Option<OrderType>,
    price: Option<Decimal>,
    time_placed: Option<DateTime<Utc>>,
}

impl OrderBuilder {
    pub fn status(mut self, open: bool) -> Self {
        self.status = open;
        self
    }

    pub fn qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    pub fn qty_filled(mut self, qty: Decimal) -> Self {
        self.qty_filled = Some(qty);
        self
    }

    pub fn qty_unfilled(mut self, qty: Decimal) -> Self {
        self.qty_unfilled = Some(qty);
        self
    }

    pub fn average_cost(mut self, cost: Decimal) -> Self {
        self.average_cost = Some(cost);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Override the placement time, which otherwise is the moment of `build`
    pub fn time_placed(mut self, time: DateTime<Utc>) -> Self {
        self.time_placed = Some(time);
        self
    }

    pub fn build(self) -> Result<Order, ValidationError> {
        let (qty, side, order_type) = check(
            &self.order_id,
            &self.strategy_id,
            self.qty,
            self.qty_filled,
            self.qty_unfilled,
            self.side,
            self.order_type,
            self.price,
        )?;

        Ok(Order {
            order_id: self.order_id,
            strategy_id: self.strategy_id,
            status: self.status,
            qty,
            qty_filled: self.qty_filled,
            qty_unfilled: self.qty_unfilled,
            average_cost: self.average_cost,
            side,
            order_type,
            price: self.price,
            contract: self.contract,
            time_placed: self.time_placed.unwrap_or_else(Utc::now),
        })
    }
}

// A reported unfilled quantity of zero counts as "not reported".
fn effective_unfilled(qty: Decimal, filled: Decimal, unfilled: Option<Decimal>) -> Decimal {
    unfilled
        .filter(|q| !q.is_zero())
        .unwrap_or(qty - filled)
}

#[allow(clippy::too_many_arguments)]
fn check(
    order_id: &str,
    strategy_id: &str,
    qty: Option<Decimal>,
    qty_filled: Option<Decimal>,
    qty_unfilled: Option<Decimal>,
    side: Option<Side>,
    order_type: Option<OrderType>,
    price: Option<Decimal>,
) -> Result<(Decimal, Side, OrderType), ValidationError> {
    if order_id.is_empty() {
        return Err(ValidationError::MissingField("orderID"));
    }
    if strategy_id.is_empty() {
        return Err(ValidationError::MissingField("strategyID"));
    }

    let qty = match qty {
        Some(q) if q > Decimal::ZERO => q,
        _ => return Err(ValidationError::NonPositiveQty),
    };

    let filled = qty_filled.unwrap_or(Decimal::ZERO);
    let unfilled = effective_unfilled(qty, filled, qty_unfilled);

    if filled < Decimal::ZERO || unfilled < Decimal::ZERO {
        return Err(ValidationError::NegativeFill);
    }
    if filled > qty {
        return Err(ValidationError::OverFilled);
    }
    if (filled + unfilled - qty).abs() > FILL_TOLERANCE {
        return Err(ValidationError::FillMismatch);
    }

    let side = side.ok_or(ValidationError::InvalidSide)?;
    let order_type = order_type.ok_or(ValidationError::InvalidOrderType)?;

    if order_type.requires_price() {
        match price {
            Some(p) if p > Decimal::ZERO => {}
            _ => return Err(ValidationError::MissingPrice(order_type.as_str())),
        }
    } else if price.is_some() {
        return Err(ValidationError::MarketOrderPrice);
    }

    Ok((qty, side, order_type))
}
