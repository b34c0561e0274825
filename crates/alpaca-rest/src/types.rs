//! Request bodies, query parameters and endpoint-specific responses

use alpaca_types::{ActionStatus, Decode, Order, OrderClass, OrderSide, OrderType, SortDirection, TimeInForce};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::endpoints::Params;
use crate::error::{RestError, RestResult};

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Orders
// ============================================================================

/// Take-profit leg of a bracket order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeProfit {
    pub limit_price: Decimal,
}

/// Stop-loss leg of a bracket order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopLoss {
    pub stop_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
}

/// Body of `POST /v2/orders`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    /// Symbol to trade
    pub symbol: String,
    /// Share quantity
    pub qty: Decimal,
    /// Order side
    pub side: OrderSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Limit price (limit and stop-limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    /// Stop price (stop and stop-limit orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    /// Trail amount in dollars (trailing stop orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_price: Option<Decimal>,
    /// Trail amount in percent (trailing stop orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_percent: Option<Decimal>,
    /// Caller-chosen unique id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// Allow execution in pre/post market sessions
    pub extended_hours: bool,
    /// Order class, omitted for simple orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_class: Option<OrderClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<TakeProfit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<StopLoss>,
}

impl OrderRequest {
    fn new(symbol: impl Into<String>, qty: Decimal, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            side,
            order_type,
            time_in_force: TimeInForce::Day,
            limit_price: None,
            stop_price: None,
            trail_price: None,
            trail_percent: None,
            client_order_id: None,
            extended_hours: false,
            order_class: None,
            take_profit: None,
            stop_loss: None,
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<String>, side: OrderSide, qty: Decimal) -> Self {
        Self::new(symbol, qty, side, OrderType::Market)
    }

    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: OrderSide, qty: Decimal, limit_price: Decimal) -> Self {
        let mut order = Self::new(symbol, qty, side, OrderType::Limit);
        order.limit_price = Some(limit_price);
        order
    }

    /// Create a stop order
    pub fn stop(symbol: impl Into<String>, side: OrderSide, qty: Decimal, stop_price: Decimal) -> Self {
        let mut order = Self::new(symbol, qty, side, OrderType::Stop);
        order.stop_price = Some(stop_price);
        order
    }

    /// Create a stop-limit order
    pub fn stop_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        qty: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Self {
        let mut order = Self::new(symbol, qty, side, OrderType::StopLimit);
        order.stop_price = Some(stop_price);
        order.limit_price = Some(limit_price);
        order
    }

    /// Create a trailing stop order that trails by a dollar amount
    pub fn trailing_stop(symbol: impl Into<String>, side: OrderSide, qty: Decimal, trail_price: Decimal) -> Self {
        let mut order = Self::new(symbol, qty, side, OrderType::TrailingStop);
        order.trail_price = Some(trail_price);
        order
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Set the client order id
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Allow the order to execute outside regular hours
    pub fn extended_hours(mut self) -> Self {
        self.extended_hours = true;
        self
    }

    /// Attach a take-profit leg, making this a bracket order
    pub fn with_take_profit(mut self, limit_price: Decimal) -> Self {
        self.order_class = Some(OrderClass::Bracket);
        self.take_profit = Some(TakeProfit { limit_price });
        self
    }

    /// Attach a stop-loss leg, making this a bracket order
    pub fn with_stop_loss(mut self, stop_price: Decimal, limit_price: Option<Decimal>) -> Self {
        self.order_class = Some(OrderClass::Bracket);
        self.stop_loss = Some(StopLoss {
            stop_price,
            limit_price,
        });
        self
    }

    /// Check the fields the order type requires before sending
    pub fn validate(&self) -> RestResult<()> {
        if self.symbol.is_empty() {
            return Err(RestError::InvalidParameter("symbol must not be empty".into()));
        }
        if self.qty <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!("qty must be positive, got {}", self.qty)));
        }
        let needs_limit = matches!(self.order_type, OrderType::Limit | OrderType::StopLimit);
        let needs_stop = matches!(self.order_type, OrderType::Stop | OrderType::StopLimit);
        if needs_limit && self.limit_price.is_none() {
            return Err(RestError::InvalidParameter(format!("{:?} order requires limit_price", self.order_type)));
        }
        if needs_stop && self.stop_price.is_none() {
            return Err(RestError::InvalidParameter(format!("{:?} order requires stop_price", self.order_type)));
        }
        if self.order_type == OrderType::TrailingStop
            && self.trail_price.is_none()
            && self.trail_percent.is_none()
        {
            return Err(RestError::InvalidParameter(
                "TrailingStop order requires trail_price or trail_percent".into(),
            ));
        }
        Ok(())
    }
}

/// Body of `PATCH /v2/orders/{id}`; only set fields are changed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaceOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
}

impl ReplaceOrderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn with_limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// True if nothing would be changed
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters for `GET /v2/orders`
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct OrderQuery {
    #[builder(default)]
    pub status: ActionStatus,
    #[builder(default, setter(strip_option))]
    pub limit: Option<u32>,
    /// Only orders submitted after this time
    #[builder(default, setter(strip_option))]
    pub after: Option<DateTime<Utc>>,
    /// Only orders submitted until this time
    #[builder(default, setter(strip_option))]
    pub until: Option<DateTime<Utc>>,
    #[builder(default, setter(strip_option))]
    pub direction: Option<SortDirection>,
    /// Roll bracket legs up under their parent order
    #[builder(default)]
    pub nested: bool,
    #[builder(default)]
    pub symbols: Vec<String>,
}

impl OrderQuery {
    pub(crate) fn to_params(&self) -> Params {
        let mut params: Params = vec![("status", self.status.as_str().to_string())];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(after) = &self.after {
            params.push(("after", rfc3339(after)));
        }
        if let Some(until) = &self.until {
            params.push(("until", rfc3339(until)));
        }
        if let Some(direction) = self.direction {
            params.push(("direction", direction.as_str().to_string()));
        }
        if self.nested {
            params.push(("nested", "true".to_string()));
        }
        if !self.symbols.is_empty() {
            params.push(("symbols", self.symbols.join(",")));
        }
        params
    }
}

/// Outcome of one order in a bulk cancel, or one position in a bulk close
#[derive(Debug, Clone, Deserialize)]
pub struct BulkOrderResult {
    /// Order id, or the symbol when closing positions
    #[serde(alias = "symbol")]
    pub id: String,
    /// Per-item HTTP status
    pub status: u16,
    /// The order on success, an error object otherwise
    #[serde(default)]
    pub body: Option<Value>,
}

impl BulkOrderResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as an order, if it is one
    pub fn order(&self) -> Option<Order> {
        self.body.clone().and_then(|body| Order::decode_value(body).ok())
    }
}

// ============================================================================
// Account
// ============================================================================

/// Filters for `GET /v2/account/activities`
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ActivityQuery {
    /// Activity type codes such as `FILL` or `DIV`; empty means all
    #[builder(default)]
    pub activity_types: Vec<String>,
    /// Only activities on this date
    #[builder(default, setter(strip_option))]
    pub date: Option<NaiveDate>,
    #[builder(default, setter(strip_option))]
    pub until: Option<DateTime<Utc>>,
    #[builder(default, setter(strip_option))]
    pub after: Option<DateTime<Utc>>,
    #[builder(default, setter(strip_option))]
    pub direction: Option<SortDirection>,
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    /// Id of the last activity of the previous page
    #[builder(default, setter(strip_option, into))]
    pub page_token: Option<String>,
}

impl ActivityQuery {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        if !self.activity_types.is_empty() {
            params.push(("activity_types", self.activity_types.join(",")));
        }
        if let Some(date) = self.date {
            params.push(("date", date.to_string()));
        }
        if let Some(until) = &self.until {
            params.push(("until", rfc3339(until)));
        }
        if let Some(after) = &self.after {
            params.push(("after", rfc3339(after)));
        }
        if let Some(direction) = self.direction {
            params.push(("direction", direction.as_str().to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        if let Some(token) = &self.page_token {
            params.push(("page_token", token.clone()));
        }
        params
    }
}

// ============================================================================
// Portfolio
// ============================================================================

/// Filters for `GET /v2/account/portfolio/history`
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct PortfolioHistoryQuery {
    /// Window length such as `1D`, `1W`, `1M` or `1A`
    #[builder(default, setter(strip_option, into))]
    pub period: Option<String>,
    /// Resolution such as `1Min`, `15Min`, `1H` or `1D`
    #[builder(default, setter(strip_option, into))]
    pub timeframe: Option<String>,
    #[builder(default, setter(strip_option))]
    pub date_end: Option<NaiveDate>,
    #[builder(default, setter(strip_option))]
    pub extended_hours: Option<bool>,
}

impl PortfolioHistoryQuery {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(period) = &self.period {
            params.push(("period", period.clone()));
        }
        if let Some(timeframe) = &self.timeframe {
            params.push(("timeframe", timeframe.clone()));
        }
        if let Some(date_end) = self.date_end {
            params.push(("date_end", date_end.to_string()));
        }
        if let Some(extended_hours) = self.extended_hours {
            params.push(("extended_hours", extended_hours.to_string()));
        }
        params
    }
}

// ============================================================================
// Market data
// ============================================================================

/// Parameters for `GET /v1/bars/{timeframe}`
#[derive(Debug, Clone, TypedBuilder)]
pub struct BarsQuery {
    /// Symbols to fetch, at most 200
    pub symbols: Vec<String>,
    /// `1Min`, `5Min`, `15Min` or `1D`
    #[builder(default = "1D".to_string(), setter(into))]
    pub timeframe: String,
    /// Bars at or after this RFC 3339 time
    #[builder(default, setter(strip_option, into))]
    pub start: Option<String>,
    /// Bars at or before this RFC 3339 time
    #[builder(default, setter(strip_option, into))]
    pub end: Option<String>,
    /// Bars strictly after this RFC 3339 time
    #[builder(default, setter(strip_option, into))]
    pub after: Option<String>,
    /// Bars strictly before this RFC 3339 time
    #[builder(default, setter(strip_option, into))]
    pub until: Option<String>,
    /// Bars per symbol, 1 to 1000
    #[builder(default = Some(100), setter(strip_option))]
    pub limit: Option<u32>,
}

impl BarsQuery {
    pub(crate) fn validate(&self) -> RestResult<()> {
        if self.symbols.is_empty() {
            return Err(RestError::InvalidParameter("at least one symbol is required".into()));
        }
        if self.symbols.len() > 200 {
            return Err(RestError::InvalidParameter(format!(
                "at most 200 symbols per request, got {}",
                self.symbols.len()
            )));
        }
        if let Some(limit) = self.limit {
            if !(1..=1000).contains(&limit) {
                return Err(RestError::InvalidParameter(format!("limit must be 1-1000, got {}", limit)));
            }
        }
        Ok(())
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params: Params = vec![("symbols", self.symbols.join(","))];
        for (key, value) in [
            ("start", &self.start),
            ("end", &self.end),
            ("after", &self.after),
            ("until", &self.until),
        ] {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}
