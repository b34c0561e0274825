//! Portfolio history

use serde::Deserialize;

use crate::decode::Decode;

/// Equity and profit/loss series from `/v2/account/portfolio/history`
///
/// All series are parallel to `timestamp`. Points before the account existed
/// come back as `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioHistory {
    /// Seconds or milliseconds since the Unix epoch, depending on timeframe
    pub timestamp: Vec<i64>,
    pub equity: Vec<Option<f64>>,
    pub profit_loss: Vec<Option<f64>>,
    pub profit_loss_pct: Vec<Option<f64>>,
    /// Equity the profit/loss series is measured against
    pub base_value: f64,
    /// Resolution, e.g. `1D` or `15Min`
    pub timeframe: String,
}

impl PortfolioHistory {
    /// Number of points in the series
    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    /// Returns true when the history has no points
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// Most recent known equity value
    pub fn latest_equity(&self) -> Option<f64> {
        self.equity.iter().rev().find_map(|value| *value)
    }
}

impl Decode for PortfolioHistory {}
