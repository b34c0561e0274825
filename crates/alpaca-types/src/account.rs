//! Account, account configuration and account activity types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decode::Decode;
use crate::enums::OrderSide;

/// Trading account summary returned by `GET /v2/account`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    /// Account id
    pub id: String,
    /// Human readable account number
    pub account_number: String,
    /// Account status, e.g. `ACTIVE`
    pub status: String,
    /// Account currency
    pub currency: String,
    /// Cash balance (negative when margin is used)
    pub cash: Decimal,
    /// Total buying power
    pub buying_power: Decimal,
    /// Reg T buying power
    pub regt_buying_power: Decimal,
    /// Day trading buying power
    pub daytrading_buying_power: Decimal,
    /// Cash plus long and short market value
    pub equity: Decimal,
    /// Equity at the previous close
    pub last_equity: Decimal,
    /// Portfolio value (same as equity)
    pub portfolio_value: Decimal,
    /// Long market value
    pub long_market_value: Decimal,
    /// Short market value
    pub short_market_value: Decimal,
    /// Initial margin requirement
    pub initial_margin: Decimal,
    /// Maintenance margin requirement
    pub maintenance_margin: Decimal,
    /// Maintenance margin at the previous close
    pub last_maintenance_margin: Decimal,
    /// Buying power multiplier
    pub multiplier: Decimal,
    /// Special memorandum account value
    pub sma: Decimal,
    /// Day trades in the last five trading days
    #[serde(default)]
    pub daytrade_count: i32,
    /// Whether the account is flagged as a pattern day trader
    #[serde(default)]
    pub pattern_day_trader: bool,
    /// Whether shorting is allowed
    #[serde(default)]
    pub shorting_enabled: bool,
    /// Account is blocked from all activity
    #[serde(default)]
    pub account_blocked: bool,
    /// Account is blocked from trading
    #[serde(default)]
    pub trading_blocked: bool,
    /// Account is blocked from transfers
    #[serde(default)]
    pub transfers_blocked: bool,
    /// Trading suspended by the account owner
    #[serde(default)]
    pub trade_suspended_by_user: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Equity change since the previous close
    pub fn gain_loss(&self) -> Decimal {
        self.equity - self.last_equity
    }

    /// Whether orders can currently be placed
    pub fn can_trade(&self) -> bool {
        !self.account_blocked && !self.trading_blocked && !self.trade_suspended_by_user
    }
}

impl Decode for Account {}

/// User-adjustable account settings (`/v2/account/configurations`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfigurations {
    /// Day trade buying power check: `both`, `entry` or `exit`
    pub dtbp_check: String,
    /// Disallow short selling
    pub no_shorting: bool,
    /// Suspend all trading
    pub suspend_trade: bool,
    /// Trade confirmation email setting: `all` or `none`
    pub trade_confirm_email: String,
}

impl Decode for AccountConfigurations {}

/// Fill activity on the account
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeActivity {
    /// Activity id
    pub id: String,
    /// Always `FILL`
    pub activity_type: String,
    /// Cumulative filled quantity of the order
    pub cum_qty: Decimal,
    /// Quantity still open on the order
    pub leaves_qty: Decimal,
    /// Order that generated the fill
    pub order_id: String,
    /// Fill price
    pub price: Decimal,
    /// Fill quantity
    pub qty: Decimal,
    /// Order side
    pub side: OrderSide,
    /// Symbol
    pub symbol: String,
    /// Execution time
    pub transaction_time: DateTime<Utc>,
    /// `fill` or `partial_fill`
    #[serde(rename = "type")]
    pub fill_type: String,
}

impl Decode for TradeActivity {}

/// Non-fill activity such as dividends, fees and transfers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NonTradeActivity {
    /// Activity id
    pub id: String,
    /// Activity code, e.g. `DIV` or `CSD`
    pub activity_type: String,
    /// Settlement date
    pub date: String,
    /// Net cash amount
    pub net_amount: Decimal,
    /// Per-share amount for dividends
    #[serde(default)]
    pub per_share_amount: Option<Decimal>,
    /// Quantity for share-based activities
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Symbol, when the activity is tied to one
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Decode for NonTradeActivity {}

/// One entry of `/v2/account/activities`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AccountActivity {
    /// Order fill
    Trade(TradeActivity),
    /// Anything else
    NonTrade(NonTradeActivity),
}

impl AccountActivity {
    /// Activity type code
    pub fn activity_type(&self) -> &str {
        match self {
            Self::Trade(activity) => &activity.activity_type,
            Self::NonTrade(activity) => &activity.activity_type,
        }
    }
}

impl Decode for AccountActivity {}
