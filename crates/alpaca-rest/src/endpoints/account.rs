//! Account endpoints

use alpaca_types::{Account, AccountActivity, AccountConfigurations};
use reqwest::Method;
use tracing::instrument;

use super::{segment, Params, RequestContext};
use crate::error::RestResult;
use crate::types::ActivityQuery;

/// Account, account configuration and activity endpoints
pub struct AccountEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Get the account
    #[instrument(skip(self))]
    pub async fn get_account(&self) -> RestResult<Account> {
        self.ctx.get("/v2/account", &Params::new()).await
    }

    /// Get the account configurations
    #[instrument(skip(self))]
    pub async fn get_account_configurations(&self) -> RestResult<AccountConfigurations> {
        self.ctx.get("/v2/account/configurations", &Params::new()).await
    }

    /// Update the account configurations, returning the stored values
    #[instrument(skip(self))]
    pub async fn update_account_configurations(
        &self,
        configurations: &AccountConfigurations,
    ) -> RestResult<AccountConfigurations> {
        self.ctx
            .send_json(Method::PATCH, "/v2/account/configurations", configurations)
            .await
    }

    /// Get account activities, trade fills and non-trade entries mixed
    ///
    /// A single activity type in the query is requested through the
    /// `/v2/account/activities/{type}` path.
    #[instrument(skip(self))]
    pub async fn get_account_activity(&self, query: &ActivityQuery) -> RestResult<Vec<AccountActivity>> {
        if let [activity_type] = query.activity_types.as_slice() {
            let mut params = query.to_params();
            params.retain(|(key, _)| *key != "activity_types");
            let path = format!("/v2/account/activities/{}", segment(activity_type));
            return self.ctx.get(&path, &params).await;
        }
        self.ctx.get("/v2/account/activities", &query.to_params()).await
    }
}
