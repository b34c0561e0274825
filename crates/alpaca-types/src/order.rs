//! Order type

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::decode::Decode;
use crate::enums::{AssetClass, OrderClass, OrderSide, OrderType, TimeInForce};

/// An order as reported by the orders endpoints and the trade update stream
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Server-assigned order id
    pub id: String,
    /// Caller-assigned order id
    pub client_order_id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Submission time
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Time of the final fill
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
    /// Expiry time
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
    /// Cancellation time
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    /// Failure time
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    /// Asset id
    pub asset_id: String,
    /// Symbol
    pub symbol: String,
    /// Asset class
    #[serde(default)]
    pub asset_class: AssetClass,
    /// Ordered quantity, absent for notional orders
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Quantity filled so far
    pub filled_qty: Decimal,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order side
    pub side: OrderSide,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Limit price
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub filled_avg_price: Option<Decimal>,
    /// Order status, e.g. `new`, `filled`, `canceled`
    pub status: String,
    /// Eligible for pre- and post-market execution
    #[serde(default)]
    pub extended_hours: bool,
    /// Order class
    #[serde(default)]
    pub order_class: OrderClass,
    /// Child orders of a bracket, OCO or OTO order
    #[serde(default)]
    pub legs: Option<Vec<Order>>,
}

impl Order {
    /// Returns true once nothing remains to fill
    pub fn is_filled(&self) -> bool {
        self.status == "filled"
    }

    /// Quantity still open, if the order was placed by quantity
    pub fn remaining_qty(&self) -> Option<Decimal> {
        self.qty.map(|qty| qty - self.filled_qty)
    }
}

impl Decode for Order {}
