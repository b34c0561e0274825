//! API endpoint implementations

pub mod account;
pub mod assets;
pub mod calendar;
pub mod market_data;
pub mod orders;
pub mod portfolio;
pub mod positions;
pub mod watchlists;

pub use account::AccountEndpoints;
pub use assets::AssetEndpoints;
pub use calendar::CalendarEndpoints;
pub use market_data::MarketDataEndpoints;
pub use orders::OrderEndpoints;
pub use portfolio::PortfolioEndpoints;
pub use positions::PositionEndpoints;
pub use watchlists::WatchlistEndpoints;

use alpaca_config::ApiCredentials;
use std::borrow::Cow;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{RestError, RestResult};

/// Header carrying the API key id
pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";

/// Header carrying the API secret key
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Query parameters as sent on the wire
pub(crate) type Params = Vec<(&'static str, String)>;

/// Percent-encode one URL path segment, so `BTC/USD` stays a single segment
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Everything an endpoint group needs to issue authenticated requests
/// against one host
#[derive(Clone, Copy)]
pub(crate) struct RequestContext<'a> {
    client: &'a Client,
    credentials: &'a ApiCredentials,
    base_url: &'a str,
}

impl<'a> RequestContext<'a> {
    pub(crate) fn new(client: &'a Client, credentials: &'a ApiCredentials, base_url: &'a str) -> Self {
        Self {
            client,
            credentials,
            base_url,
        }
    }

    fn request(&self, method: Method, path: &str, params: &Params) -> RestResult<RequestBuilder> {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query = serde_urlencoded::to_string(params)
                .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }

        debug!("{} {}", method, url);

        Ok(self
            .client
            .request(method, url)
            .header(KEY_ID_HEADER, self.credentials.key_id())
            .header(SECRET_KEY_HEADER, self.credentials.secret_key()))
    }

    /// Send the request and return the body of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> RestResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Request failed: {}", body);
            return Err(RestError::from_response(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RestResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, params: &Params) -> RestResult<T> {
        let request = self.request(Method::GET, path, params)?;
        self.execute_json(request).await
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path, &Params::new())?.json(body);
        self.execute_json(request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        let request = self.request(Method::DELETE, path, &Params::new())?;
        self.execute_json(request).await
    }

    /// DELETE where success carries no body (HTTP 204)
    pub(crate) async fn delete_empty(&self, path: &str) -> RestResult<()> {
        let request = self.request(Method::DELETE, path, &Params::new())?;
        self.execute(request).await.map(|_| ())
    }
}
