//! Position endpoints

use alpaca_types::{Order, Position};
use tracing::instrument;

use super::{segment, Params, RequestContext};
use crate::error::RestResult;
use crate::types::BulkOrderResult;

/// Open position endpoints
pub struct PositionEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> PositionEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// List open positions
    #[instrument(skip(self))]
    pub async fn get_positions(&self) -> RestResult<Vec<Position>> {
        self.ctx.get("/v2/positions", &Params::new()).await
    }

    /// Get the open position in one symbol
    #[instrument(skip(self))]
    pub async fn get_position(&self, symbol: &str) -> RestResult<Position> {
        self.ctx.get(&format!("/v2/positions/{}", segment(symbol)), &Params::new()).await
    }

    /// Liquidate the position in one symbol, returning the closing order
    #[instrument(skip(self))]
    pub async fn close_position(&self, symbol: &str) -> RestResult<Order> {
        self.ctx.delete(&format!("/v2/positions/{}", segment(symbol))).await
    }

    /// Liquidate every open position
    #[instrument(skip(self))]
    pub async fn close_positions(&self) -> RestResult<Vec<BulkOrderResult>> {
        self.ctx.delete("/v2/positions").await
    }
}
