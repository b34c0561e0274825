//! Asset endpoints

use alpaca_types::{ActionStatus, Asset, AssetClass};
use tracing::instrument;

use super::{segment, Params, RequestContext};
use crate::error::RestResult;

/// Asset listing endpoints
pub struct AssetEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> AssetEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// List assets
    ///
    /// # Arguments
    /// * `status` - `Active` for tradable assets; `All` skips the filter
    /// * `asset_class` - Asset class to list
    #[instrument(skip(self))]
    pub async fn get_assets(&self, status: ActionStatus, asset_class: AssetClass) -> RestResult<Vec<Asset>> {
        let mut params = Params::new();
        if status != ActionStatus::All {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("asset_class", asset_class.as_str().to_string()));
        self.ctx.get("/v2/assets", &params).await
    }

    /// Get an asset by symbol or asset id
    #[instrument(skip(self))]
    pub async fn get_asset(&self, symbol: &str) -> RestResult<Asset> {
        self.ctx.get(&format!("/v2/assets/{}", segment(symbol)), &Params::new()).await
    }
}
