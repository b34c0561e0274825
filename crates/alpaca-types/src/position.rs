//! Open position type

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::decode::Decode;
use crate::enums::{AssetClass, PositionSide};

/// An open position in one asset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Position {
    pub asset_id: String,
    pub symbol: String,
    pub exchange: String,
    #[serde(default)]
    pub asset_class: AssetClass,
    pub avg_entry_price: Decimal,
    pub qty: Decimal,
    pub side: PositionSide,
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub unrealized_pl: Decimal,
    /// Unrealized profit/loss as a fraction of cost basis
    pub unrealized_plpc: Decimal,
    pub unrealized_intraday_pl: Decimal,
    pub unrealized_intraday_plpc: Decimal,
    pub current_price: Decimal,
    /// Price at the previous close
    pub lastday_price: Decimal,
    /// Fractional price change since the previous close
    pub change_today: Decimal,
}

impl Position {
    /// Returns true for short positions
    pub fn is_short(&self) -> bool {
        self.side == PositionSide::Short
    }
}

impl Decode for Position {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_decode() {
        let json = r#"{
            "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
            "symbol": "AAPL",
            "exchange": "NASDAQ",
            "asset_class": "us_equity",
            "avg_entry_price": "100.0",
            "qty": "5",
            "side": "long",
            "market_value": "600.0",
            "cost_basis": "500.0",
            "unrealized_pl": "100.0",
            "unrealized_plpc": "0.20",
            "unrealized_intraday_pl": "10.0",
            "unrealized_intraday_plpc": "0.0084",
            "current_price": "120.0",
            "lastday_price": "119.0",
            "change_today": "0.0084"
        }"#;

        let position = Position::decode(json).unwrap();
        assert_eq!(position.exchange, "NASDAQ");
        assert_eq!(position.qty, dec!(5));
        assert_eq!(position.unrealized_pl, dec!(100));
        assert!(!position.is_short());
    }
}
