//! Shared types for the Alpaca trading API
//!
//! This crate provides the type definitions used across the workspace. It has
//! no networking dependencies and can be used on its own to decode payloads.
//!
//! # Key Types
//!
//! - [`Channel`], [`ReplyKind`], [`Reply`] - Streaming protocol vocabulary
//! - [`authentication_message`], [`listen_message`], [`decode_reply`] - Stream message codec
//! - [`Account`], [`Order`], [`Position`], [`Asset`] - Trading resources
//! - [`Bars`], [`LastQuote`], [`LastTrade`] - Market data
//! - [`TradeUpdate`], [`AccountUpdate`] - Typed stream payloads
//! - [`Decode`], [`DecodeError`] - JSON decoding contract

pub mod account;
pub mod asset;
pub mod calendar;
pub mod decode;
pub mod enums;
pub mod error;
pub mod market_data;
pub mod messages;
pub mod order;
pub mod portfolio;
pub mod position;
pub mod updates;
pub mod watchlist;

// Re-export commonly used types
pub use account::*;
pub use asset::*;
pub use calendar::*;
pub use decode::*;
pub use enums::*;
pub use error::*;
pub use market_data::*;
pub use messages::*;
pub use order::*;
pub use portfolio::*;
pub use position::*;
pub use updates::*;
pub use watchlist::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
