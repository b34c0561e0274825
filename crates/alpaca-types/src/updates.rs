//! Typed payloads of the `trade_updates` and `account_updates` channels
//!
//! The stream hands callbacks the raw payload text; these types are the
//! usual next step.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::decode::Decode;
use crate::order::Order;

/// Order lifecycle event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeEvent {
    New,
    Fill,
    PartialFill,
    Canceled,
    Expired,
    DoneForDay,
    Replaced,
    Rejected,
    PendingNew,
    Stopped,
    PendingCancel,
    PendingReplace,
    Calculated,
    Suspended,
    OrderReplaceRejected,
    OrderCancelRejected,
    /// Event names added after this client was written
    #[serde(other)]
    Unknown,
}

impl TradeEvent {
    /// Returns true for events that change the filled quantity
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Fill | Self::PartialFill)
    }
}

/// Payload of a `trade_updates` message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeUpdate {
    pub event: TradeEvent,
    /// Order state after the event
    pub order: Order,
    /// Execution price, set on fills
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Execution quantity, set on fills
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Position size after a fill
    #[serde(default)]
    pub position_qty: Option<Decimal>,
    /// Event time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Decode for TradeUpdate {}

/// Payload of an `account_updates` message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountUpdate {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub status: String,
    pub currency: String,
    pub cash: Decimal,
    pub cash_withdrawable: Decimal,
}

impl Decode for AccountUpdate {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::OrderSide;
    use crate::error::DecodeError;
    use rust_decimal_macros::dec;

    const FILL_JSON: &str = r#"{
        "event": "fill",
        "price": "179.08",
        "qty": "1",
        "position_qty": "100",
        "timestamp": "2018-02-28T20:38:22Z",
        "order": {
            "id": "7b7653c4-7468-494a-aeb3-d5f255789473",
            "client_order_id": "7b7653c4-7468-494a-aeb3-d5f255789473",
            "created_at": "2018-02-28T20:38:22Z",
            "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
            "symbol": "AAPL",
            "asset_class": "us_equity",
            "qty": "1",
            "filled_qty": "1",
            "type": "market",
            "side": "buy",
            "time_in_force": "day",
            "filled_avg_price": "179.08",
            "status": "filled"
        }
    }"#;

    #[test]
    fn test_trade_update_decode() {
        let update = TradeUpdate::decode(FILL_JSON).unwrap();
        assert_eq!(update.event, TradeEvent::Fill);
        assert!(update.event.is_execution());
        assert_eq!(update.price, Some(dec!(179.08)));
        assert_eq!(update.position_qty, Some(dec!(100)));
        assert_eq!(update.order.side, OrderSide::Buy);
        assert!(update.order.is_filled());
    }

    #[test]
    fn test_unknown_trade_event() {
        let json = FILL_JSON.replace(r#""event": "fill""#, r#""event": "held_for_review""#);
        let update = TradeUpdate::decode(&json).unwrap();
        assert_eq!(update.event, TradeEvent::Unknown);
        assert!(!update.event.is_execution());
    }

    #[test]
    fn test_account_update_decode() {
        let json = r#"{
            "id": "ef505a9a-2f3c-4b8a-be95-6b6f185f8a03",
            "created_at": "2018-10-01T13:35:25Z",
            "updated_at": "2018-10-01T13:37:25Z",
            "deleted_at": null,
            "status": "ACTIVE",
            "currency": "USD",
            "cash": "1241.54",
            "cash_withdrawable": "523.71"
        }"#;

        let update = AccountUpdate::decode(json).unwrap();
        assert_eq!(update.status, "ACTIVE");
        assert_eq!(update.cash, dec!(1241.54));
        assert!(update.updated_at.is_some());
        assert!(update.deleted_at.is_none());

        assert_eq!(AccountUpdate::decode("\"\"").unwrap_err(), DecodeError::NotAnObject);
    }
}
