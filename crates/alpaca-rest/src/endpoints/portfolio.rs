//! Portfolio history endpoint

use alpaca_types::PortfolioHistory;
use tracing::instrument;

use super::RequestContext;
use crate::error::RestResult;
use crate::types::PortfolioHistoryQuery;

pub struct PortfolioEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> PortfolioEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Get equity and profit/loss over time
    #[instrument(skip(self))]
    pub async fn get_portfolio_history(&self, query: &PortfolioHistoryQuery) -> RestResult<PortfolioHistory> {
        self.ctx
            .get("/v2/account/portfolio/history", &query.to_params())
            .await
    }
}
