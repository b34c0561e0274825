//! Watchlist type

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::asset::Asset;
use crate::decode::Decode;

/// A named list of assets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Watchlist {
    pub id: String,
    pub account_id: String,
    pub name: String,
    /// Assets on the list; omitted by the list-all endpoint
    #[serde(default)]
    pub assets: Vec<Asset>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Watchlist {
    /// Returns true if `symbol` is on the list
    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.iter().any(|asset| asset.symbol == symbol)
    }
}

impl Decode for Watchlist {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_decode() {
        let json = r#"{
            "account_id": "1d5493c9-ea39-4377-aa94-340734c368ae",
            "assets": [
                {
                    "class": "us_equity",
                    "easy_to_borrow": true,
                    "exchange": "ARCA",
                    "id": "b28f4066-5c6d-479b-a2af-85dc1a8f16fb",
                    "marginable": true,
                    "shortable": true,
                    "status": "active",
                    "symbol": "SPY",
                    "tradable": true
                },
                {
                    "class": "us_equity",
                    "easy_to_borrow": false,
                    "exchange": "NASDAQ",
                    "id": "f801f835-bfe6-4a9d-a6b1-ccbb84bfd75f",
                    "marginable": true,
                    "shortable": false,
                    "status": "active",
                    "symbol": "AMZN",
                    "tradable": true
                }
            ],
            "created_at": "2019-10-30T07:54:42.981322Z",
            "id": "fb306e55-16d3-4118-8c3d-c1615fcd4c03",
            "name": "Monday List",
            "updated_at": "2019-10-30T07:54:42.981322Z"
        }"#;

        let watchlist = Watchlist::decode(json).unwrap();
        assert_eq!(watchlist.assets.len(), 2);
        assert_eq!(watchlist.name, "Monday List");
        assert!(watchlist.contains("AMZN"));
        assert!(!watchlist.contains("TSLA"));
    }

    #[test]
    fn test_watchlist_without_assets() {
        let json = r#"{
            "account_id": "a",
            "created_at": "2019-10-30T07:54:42Z",
            "id": "w",
            "name": "Empty",
            "updated_at": "2019-10-30T07:54:42Z"
        }"#;

        let watchlist = Watchlist::decode(json).unwrap();
        assert!(watchlist.assets.is_empty());
    }
}
