//! Market data endpoints
//!
//! These are served from the data host, not the trading host.

use alpaca_types::{Bars, LastQuote, LastTrade};
use tracing::{debug, instrument};

use super::{segment, Params, RequestContext};
use crate::error::RestResult;
use crate::types::BarsQuery;

/// Historical bars and last trade/quote endpoints
pub struct MarketDataEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> MarketDataEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Get bars for one or more symbols, keyed by symbol
    #[instrument(skip(self))]
    pub async fn get_bars(&self, query: &BarsQuery) -> RestResult<Bars> {
        query.validate()?;
        debug!("Fetching {} bars for {} symbols", query.timeframe, query.symbols.len());
        self.ctx
            .get(&format!("/v1/bars/{}", segment(&query.timeframe)), &query.to_params())
            .await
    }

    /// Get the most recent trade for a symbol
    #[instrument(skip(self))]
    pub async fn get_last_trade(&self, symbol: &str) -> RestResult<LastTrade> {
        self.ctx
            .get(&format!("/v1/last/stocks/{}", segment(symbol)), &Params::new())
            .await
    }

    /// Get the most recent quote for a symbol
    #[instrument(skip(self))]
    pub async fn get_last_quote(&self, symbol: &str) -> RestResult<LastQuote> {
        self.ctx
            .get(&format!("/v1/last_quote/stocks/{}", segment(symbol)), &Params::new())
            .await
    }
}
