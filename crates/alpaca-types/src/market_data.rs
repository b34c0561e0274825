//! Market data: bars, last quote and last trade

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::decode::Decode;

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bar {
    /// Bar start, seconds since the Unix epoch
    #[serde(rename = "t")]
    pub time: u64,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "v")]
    pub volume: u64,
}

impl Bar {
    /// High minus low
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

impl Decode for Bar {}

/// Bars keyed by symbol
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Bars {
    pub bars: BTreeMap<String, Vec<Bar>>,
}

impl Bars {
    /// Bars for one symbol, oldest first
    pub fn get(&self, symbol: &str) -> Option<&[Bar]> {
        self.bars.get(symbol).map(Vec::as_slice)
    }

    /// Symbols present in the response
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bars.keys().map(String::as_str)
    }
}

impl Decode for Bars {}

/// Top-of-book quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Quote {
    #[serde(rename = "askprice")]
    pub ask_price: Decimal,
    #[serde(rename = "asksize")]
    pub ask_size: u32,
    #[serde(rename = "askexchange")]
    pub ask_exchange: u32,
    #[serde(rename = "bidprice")]
    pub bid_price: Decimal,
    #[serde(rename = "bidsize")]
    pub bid_size: u32,
    #[serde(rename = "bidexchange")]
    pub bid_exchange: u32,
    /// Nanoseconds since the Unix epoch
    pub timestamp: u64,
}

impl Quote {
    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }
}

/// Response of the last quote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LastQuote {
    pub status: String,
    pub symbol: String,
    #[serde(rename = "last")]
    pub quote: Quote,
}

impl Decode for LastQuote {}

/// Last reported trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Trade {
    pub price: Decimal,
    pub size: u32,
    pub exchange: u32,
    /// Sale condition codes
    pub cond1: i32,
    pub cond2: i32,
    pub cond3: i32,
    pub cond4: i32,
    /// Nanoseconds since the Unix epoch
    pub timestamp: u64,
}

/// Response of the last trade endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LastTrade {
    pub status: String,
    pub symbol: String,
    #[serde(rename = "last")]
    pub trade: Trade,
}

impl Decode for LastTrade {}
