//! Streaming endpoint definitions

use alpaca_config::{API_BASE_URL_LIVE, API_BASE_URL_PAPER};
use std::fmt;

/// Path of the account streaming WebSocket on the trading host
pub const STREAM_PATH: &str = "/stream";

/// Alpaca account streaming endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// Paper trading (default)
    #[default]
    Paper,
    /// Live trading
    Live,
}

impl Endpoint {
    /// Get the WebSocket URL for this endpoint
    pub fn url(&self) -> String {
        match self {
            Self::Paper => stream_url(API_BASE_URL_PAPER),
            Self::Live => stream_url(API_BASE_URL_LIVE),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

/// Derive the streaming URL from a trading base URL.
///
/// Bare hosts and `https://` become `wss://`; `http://` becomes `ws://` so a
/// plain local server can stand in for the real one. Trailing slashes are
/// dropped before `/stream` is appended.
pub fn stream_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let host = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else if base.starts_with("wss://") || base.starts_with("ws://") {
        base.to_string()
    } else {
        format!("wss://{}", base)
    };
    format!("{}{}", host, STREAM_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(Endpoint::Paper.url(), "wss://paper-api.alpaca.markets/stream");
        assert_eq!(Endpoint::Live.url(), "wss://api.alpaca.markets/stream");
        assert_eq!(Endpoint::default(), Endpoint::Paper);
    }

    #[test]
    fn test_stream_url_schemes() {
        assert_eq!(
            stream_url("paper-api.alpaca.markets"),
            "wss://paper-api.alpaca.markets/stream"
        );
        assert_eq!(
            stream_url("https://api.alpaca.markets/"),
            "wss://api.alpaca.markets/stream"
        );
        assert_eq!(stream_url("http://127.0.0.1:9000"), "ws://127.0.0.1:9000/stream");
        assert_eq!(stream_url("wss://example.test"), "wss://example.test/stream");
    }
}
