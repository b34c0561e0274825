//! Tradable asset type

use serde::Deserialize;

use crate::decode::Decode;
use crate::enums::{AssetClass, AssetStatus};

/// An asset from `/v2/assets`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    /// Asset id
    pub id: String,
    /// Asset class
    #[serde(rename = "class")]
    pub asset_class: AssetClass,
    /// Listing exchange
    pub exchange: String,
    /// Ticker symbol
    pub symbol: String,
    /// Listing status
    pub status: AssetStatus,
    /// Can be traded through the API
    pub tradable: bool,
    /// Can be bought on margin
    pub marginable: bool,
    /// Can be sold short
    pub shortable: bool,
    /// Shares are readily available to borrow
    pub easy_to_borrow: bool,
}

impl Decode for Asset {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_decode() {
        let json = r#"{
            "id": "904837e3-3b76-47ec-b432-046db621571b",
            "class": "us_equity",
            "exchange": "NASDAQ",
            "symbol": "AAPL",
            "status": "active",
            "tradable": true,
            "marginable": true,
            "shortable": true,
            "easy_to_borrow": true
        }"#;

        let asset = Asset::decode(json).unwrap();
        assert_eq!(asset.symbol, "AAPL");
        assert_eq!(asset.asset_class, AssetClass::UsEquity);
        assert_eq!(asset.status, AssetStatus::Active);
        assert!(asset.tradable);
    }
}
