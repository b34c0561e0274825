//! Main REST client implementation

use alpaca_config::{ApiCredentials, Environment};
use alpaca_types::{
    Account, AccountActivity, AccountConfigurations, ActionStatus, Asset, AssetClass, Bars, CalendarDay, Clock,
    LastQuote, LastTrade, Order, PortfolioHistory, Position, Watchlist,
};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::endpoints::{
    AccountEndpoints, AssetEndpoints, CalendarEndpoints, MarketDataEndpoints, OrderEndpoints, PortfolioEndpoints,
    PositionEndpoints, RequestContext, WatchlistEndpoints,
};
use crate::error::RestResult;
use crate::types::{
    ActivityQuery, BarsQuery, BulkOrderResult, OrderQuery, OrderRequest, PortfolioHistoryQuery, ReplaceOrderRequest,
};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Turn a configured host into a URL prefix.
///
/// Bare hosts get `https://`; an explicit `http://` or `https://` scheme is
/// kept. Trailing slashes are dropped.
pub fn api_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Alpaca REST API client
///
/// Trading endpoints go to the configured base host, market data endpoints
/// to the data host. Every request carries the key id and secret key
/// headers.
///
/// # Example
///
/// ```no_run
/// use alpaca_config::Environment;
/// use alpaca_rest::AlpacaClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut env = Environment::new();
///     let client = AlpacaClient::new(&mut env)?;
///
///     let account = client.get_account().await?;
///     println!("Buying power: {}", account.buying_power);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AlpacaClient {
    http_client: Client,
    credentials: ApiCredentials,
    base_url: String,
    data_url: String,
}

impl std::fmt::Debug for AlpacaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("data_url", &self.data_url)
            .finish()
    }
}

impl AlpacaClient {
    /// Create a client from the environment, parsing it if needed
    pub fn new(env: &mut Environment) -> RestResult<Self> {
        let credentials = env.ensure_parsed()?.clone();
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from explicit credentials
    pub fn from_credentials(credentials: ApiCredentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: ApiCredentials, config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        let base_url = api_url(credentials.base_url());
        let data_url = api_url(credentials.data_url());
        info!(%base_url, %data_url, paper = credentials.is_paper(), "Created Alpaca REST client");

        Ok(Self {
            http_client,
            credentials,
            base_url,
            data_url,
        })
    }

    /// Trading host URL prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Market data host URL prefix
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    fn trading_context(&self) -> RequestContext<'_> {
        RequestContext::new(&self.http_client, &self.credentials, &self.base_url)
    }

    fn data_context(&self) -> RequestContext<'_> {
        RequestContext::new(&self.http_client, &self.credentials, &self.data_url)
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self.trading_context())
    }

    /// Get the account
    pub async fn get_account(&self) -> RestResult<Account> {
        self.account().get_account().await
    }

    /// Get the account configurations
    pub async fn get_account_configurations(&self) -> RestResult<AccountConfigurations> {
        self.account().get_account_configurations().await
    }

    /// Update the account configurations
    pub async fn update_account_configurations(
        &self,
        configurations: &AccountConfigurations,
    ) -> RestResult<AccountConfigurations> {
        self.account().update_account_configurations(configurations).await
    }

    /// Get account activities
    pub async fn get_account_activity(&self, query: &ActivityQuery) -> RestResult<Vec<AccountActivity>> {
        self.account().get_account_activity(query).await
    }

    // ========================================================================
    // Order Endpoints
    // ========================================================================

    /// Get order endpoints
    pub fn orders(&self) -> OrderEndpoints<'_> {
        OrderEndpoints::new(self.trading_context())
    }

    /// List orders
    pub async fn get_orders(&self, query: &OrderQuery) -> RestResult<Vec<Order>> {
        self.orders().get_orders(query).await
    }

    /// Get an order by id
    pub async fn get_order(&self, id: &str) -> RestResult<Order> {
        self.orders().get_order(id, false).await
    }

    /// Get an order by client order id
    pub async fn get_order_by_client_order_id(&self, client_order_id: &str) -> RestResult<Order> {
        self.orders().get_order_by_client_order_id(client_order_id).await
    }

    /// Submit an order
    pub async fn submit_order(&self, order: &OrderRequest) -> RestResult<Order> {
        self.orders().submit_order(order).await
    }

    /// Replace an open order
    pub async fn replace_order(&self, id: &str, replace: &ReplaceOrderRequest) -> RestResult<Order> {
        self.orders().replace_order(id, replace).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, id: &str) -> RestResult<()> {
        self.orders().cancel_order(id).await
    }

    /// Cancel all open orders
    pub async fn cancel_orders(&self) -> RestResult<Vec<BulkOrderResult>> {
        self.orders().cancel_orders().await
    }

    // ========================================================================
    // Position Endpoints
    // ========================================================================

    /// Get position endpoints
    pub fn positions(&self) -> PositionEndpoints<'_> {
        PositionEndpoints::new(self.trading_context())
    }

    /// List open positions
    pub async fn get_positions(&self) -> RestResult<Vec<Position>> {
        self.positions().get_positions().await
    }

    /// Get the position in a symbol
    pub async fn get_position(&self, symbol: &str) -> RestResult<Position> {
        self.positions().get_position(symbol).await
    }

    /// Close the position in a symbol
    pub async fn close_position(&self, symbol: &str) -> RestResult<Order> {
        self.positions().close_position(symbol).await
    }

    /// Close all positions
    pub async fn close_positions(&self) -> RestResult<Vec<BulkOrderResult>> {
        self.positions().close_positions().await
    }

    // ========================================================================
    // Asset Endpoints
    // ========================================================================

    /// Get asset endpoints
    pub fn assets(&self) -> AssetEndpoints<'_> {
        AssetEndpoints::new(self.trading_context())
    }

    /// List assets
    pub async fn get_assets(&self, status: ActionStatus, asset_class: AssetClass) -> RestResult<Vec<Asset>> {
        self.assets().get_assets(status, asset_class).await
    }

    /// Get an asset
    pub async fn get_asset(&self, symbol: &str) -> RestResult<Asset> {
        self.assets().get_asset(symbol).await
    }

    // ========================================================================
    // Clock and Calendar Endpoints
    // ========================================================================

    /// Get clock and calendar endpoints
    pub fn calendar(&self) -> CalendarEndpoints<'_> {
        CalendarEndpoints::new(self.trading_context())
    }

    /// Get the market clock
    pub async fn get_clock(&self) -> RestResult<Clock> {
        self.calendar().get_clock().await
    }

    /// Get the market calendar
    pub async fn get_calendar(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> RestResult<Vec<CalendarDay>> {
        self.calendar().get_calendar(start, end).await
    }

    // ========================================================================
    // Watchlist Endpoints
    // ========================================================================

    /// Get watchlist endpoints
    pub fn watchlists(&self) -> WatchlistEndpoints<'_> {
        WatchlistEndpoints::new(self.trading_context())
    }

    /// List watchlists
    pub async fn get_watchlists(&self) -> RestResult<Vec<Watchlist>> {
        self.watchlists().get_watchlists().await
    }

    /// Get a watchlist
    pub async fn get_watchlist(&self, id: &str) -> RestResult<Watchlist> {
        self.watchlists().get_watchlist(id).await
    }

    /// Create a watchlist
    pub async fn create_watchlist(&self, name: &str, symbols: &[String]) -> RestResult<Watchlist> {
        self.watchlists().create_watchlist(name, symbols).await
    }

    /// Replace a watchlist's name and symbols
    pub async fn update_watchlist(&self, id: &str, name: &str, symbols: &[String]) -> RestResult<Watchlist> {
        self.watchlists().update_watchlist(id, name, symbols).await
    }

    /// Add a symbol to a watchlist
    pub async fn add_asset_to_watchlist(&self, id: &str, symbol: &str) -> RestResult<Watchlist> {
        self.watchlists().add_asset_to_watchlist(id, symbol).await
    }

    /// Remove a symbol from a watchlist
    pub async fn remove_asset_from_watchlist(&self, id: &str, symbol: &str) -> RestResult<Watchlist> {
        self.watchlists().remove_asset_from_watchlist(id, symbol).await
    }

    /// Delete a watchlist
    pub async fn delete_watchlist(&self, id: &str) -> RestResult<()> {
        self.watchlists().delete_watchlist(id).await
    }

    // ========================================================================
    // Portfolio Endpoints
    // ========================================================================

    /// Get portfolio endpoints
    pub fn portfolio(&self) -> PortfolioEndpoints<'_> {
        PortfolioEndpoints::new(self.trading_context())
    }

    /// Get portfolio history
    pub async fn get_portfolio_history(&self, query: &PortfolioHistoryQuery) -> RestResult<PortfolioHistory> {
        self.portfolio().get_portfolio_history(query).await
    }

    // ========================================================================
    // Market Data Endpoints
    // ========================================================================

    /// Get market data endpoints
    pub fn market_data(&self) -> MarketDataEndpoints<'_> {
        MarketDataEndpoints::new(self.data_context())
    }

    /// Get bars
    pub async fn get_bars(&self, query: &BarsQuery) -> RestResult<Bars> {
        self.market_data().get_bars(query).await
    }

    /// Get the last trade for a symbol
    pub async fn get_last_trade(&self, symbol: &str) -> RestResult<LastTrade> {
        self.market_data().get_last_trade(symbol).await
    }

    /// Get the last quote for a symbol
    pub async fn get_last_quote(&self, symbol: &str) -> RestResult<LastQuote> {
        self.market_data().get_last_quote(symbol).await
    }
}

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("alpaca-rest/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
