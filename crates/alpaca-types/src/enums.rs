//! Channel, ReplyKind, OrderSide, OrderType and related enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Subscribable update streams on the account WebSocket
///
/// Ordering follows declaration order, which is also the order channels are
/// written into a listen request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Order lifecycle events (fills, cancels, ...)
    TradeUpdates,
    /// Account balance and status changes
    AccountUpdates,
}

impl Channel {
    /// Every channel the stream supports
    pub const ALL: [Channel; 2] = [Channel::TradeUpdates, Channel::AccountUpdates];

    /// Returns the stream name as used in protocol messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TradeUpdates => "trade_updates",
            Self::AccountUpdates => "account_updates",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade_updates" => Ok(Self::TradeUpdates),
            "account_updates" => Ok(Self::AccountUpdates),
            other => Err(DecodeError::UnknownStream(other.to_string())),
        }
    }
}

/// Semantic category of an inbound stream message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// Acknowledgement of the authenticate action
    Authorization,
    /// Acknowledgement of the listen action
    Listening,
    /// Data pushed on a subscribed channel
    Update,
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authorization => "authorization",
            Self::Listening => "listening",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// Order status filter used when listing orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// Orders that can still fill
    #[default]
    Open,
    /// Filled, canceled or expired orders
    Closed,
    /// Active assets
    Active,
    /// No filtering
    All,
}

impl ActionStatus {
    /// Returns the status as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Active => "active",
            Self::All => "all",
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Executes immediately at the best available price
    Market,
    /// Executes at the limit price or better
    Limit,
    /// Becomes a market order once the stop price is reached
    Stop,
    /// Becomes a limit order once the stop price is reached
    StopLimit,
    /// Stop price follows the market by a trail amount
    TrailingStop,
}

/// Order class for multi-leg orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Single order
    #[default]
    Simple,
    /// Entry with take-profit and stop-loss legs
    Bracket,
    /// One cancels other
    Oco,
    /// One triggers other
    Oto,
}

/// How long an order stays working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Valid for the trading day only
    Day,
    /// Good till canceled
    Gtc,
    /// Market or limit on open
    Opg,
    /// Market or limit on close
    Cls,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

/// Asset classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// US listed equities
    #[default]
    UsEquity,
    /// US listed options
    UsOption,
    /// Crypto pairs
    Crypto,
}

impl AssetClass {
    /// Returns the class name as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsEquity => "us_equity",
            Self::UsOption => "us_option",
            Self::Crypto => "crypto",
        }
    }
}

/// Asset tradability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Listed and tradable
    Active,
    /// Delisted or halted
    Inactive,
}

/// Position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long position
    Long,
    /// Short position
    Short,
}

/// Chronological ordering for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the direction as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
