//! Order endpoints

use alpaca_types::Order;
use reqwest::Method;
use tracing::{debug, instrument};

use super::{segment, Params, RequestContext};
use crate::error::{RestError, RestResult};
use crate::types::{BulkOrderResult, OrderQuery, OrderRequest, ReplaceOrderRequest};

/// Order placement and management endpoints
pub struct OrderEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> OrderEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// List orders matching the query
    #[instrument(skip(self))]
    pub async fn get_orders(&self, query: &OrderQuery) -> RestResult<Vec<Order>> {
        self.ctx.get("/v2/orders", &query.to_params()).await
    }

    /// Get an order by its server-assigned id
    ///
    /// # Arguments
    /// * `nested` - Include bracket legs under the parent
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str, nested: bool) -> RestResult<Order> {
        let mut params = Params::new();
        if nested {
            params.push(("nested", "true".to_string()));
        }
        self.ctx.get(&format!("/v2/orders/{}", segment(id)), &params).await
    }

    /// Get an order by the id the caller chose when submitting it
    #[instrument(skip(self))]
    pub async fn get_order_by_client_order_id(&self, client_order_id: &str) -> RestResult<Order> {
        let params: Params = vec![("client_order_id", client_order_id.to_string())];
        self.ctx.get("/v2/orders:by_client_order_id", &params).await
    }

    /// Submit a new order
    #[instrument(skip(self, order), fields(symbol = %order.symbol))]
    pub async fn submit_order(&self, order: &OrderRequest) -> RestResult<Order> {
        order.validate()?;
        debug!(?order.side, ?order.order_type, qty = %order.qty, "Submitting order");
        self.ctx.send_json(Method::POST, "/v2/orders", order).await
    }

    /// Replace an open order, returning the new order
    #[instrument(skip(self))]
    pub async fn replace_order(&self, id: &str, replace: &ReplaceOrderRequest) -> RestResult<Order> {
        if replace.is_empty() {
            return Err(RestError::InvalidParameter("replace request changes nothing".into()));
        }
        self.ctx
            .send_json(Method::PATCH, &format!("/v2/orders/{}", segment(id)), replace)
            .await
    }

    /// Cancel an open order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<()> {
        self.ctx.delete_empty(&format!("/v2/orders/{}", segment(id))).await
    }

    /// Cancel all open orders
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self) -> RestResult<Vec<BulkOrderResult>> {
        self.ctx.delete("/v2/orders").await
    }
}
