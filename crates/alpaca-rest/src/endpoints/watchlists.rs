//! Watchlist endpoints

use alpaca_types::Watchlist;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use super::{segment, Params, RequestContext};
use crate::error::RestResult;

#[derive(Serialize)]
struct WatchlistBody<'b> {
    name: &'b str,
    symbols: &'b [String],
}

#[derive(Serialize)]
struct SymbolBody<'b> {
    symbol: &'b str,
}

/// Watchlist CRUD endpoints
pub struct WatchlistEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> WatchlistEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// List watchlists. Entries in the list carry no assets.
    #[instrument(skip(self))]
    pub async fn get_watchlists(&self) -> RestResult<Vec<Watchlist>> {
        self.ctx.get("/v2/watchlists", &Params::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_watchlist(&self, id: &str) -> RestResult<Watchlist> {
        self.ctx.get(&format!("/v2/watchlists/{}", segment(id)), &Params::new()).await
    }

    #[instrument(skip(self))]
    pub async fn create_watchlist(&self, name: &str, symbols: &[String]) -> RestResult<Watchlist> {
        let body = WatchlistBody { name, symbols };
        self.ctx.send_json(Method::POST, "/v2/watchlists", &body).await
    }

    /// Rename a watchlist and replace its symbols
    #[instrument(skip(self))]
    pub async fn update_watchlist(&self, id: &str, name: &str, symbols: &[String]) -> RestResult<Watchlist> {
        let body = WatchlistBody { name, symbols };
        self.ctx
            .send_json(Method::PUT, &format!("/v2/watchlists/{}", segment(id)), &body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_asset_to_watchlist(&self, id: &str, symbol: &str) -> RestResult<Watchlist> {
        let body = SymbolBody { symbol };
        self.ctx
            .send_json(Method::POST, &format!("/v2/watchlists/{}", segment(id)), &body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_asset_from_watchlist(&self, id: &str, symbol: &str) -> RestResult<Watchlist> {
        self.ctx.delete(&format!("/v2/watchlists/{}/{}", segment(id), segment(symbol))).await
    }

    #[instrument(skip(self))]
    pub async fn delete_watchlist(&self, id: &str) -> RestResult<()> {
        self.ctx.delete_empty(&format!("/v2/watchlists/{}", segment(id))).await
    }
}
