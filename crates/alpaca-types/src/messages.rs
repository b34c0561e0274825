//! Control and reply messages for the account streaming WebSocket
//!
//! Outbound:
//!
//! ```text
//! {"action":"authenticate","data":{"key_id":"...","secret_key":"..."}}
//! {"action":"listen","data":{"streams":["trade_updates","account_updates"]}}
//! ```
//!
//! Inbound frames share one envelope, `{"stream":"<name>","data":{...}}`,
//! where `<name>` is `authorization`, `listening` or a channel name.

use crate::enums::{Channel, ReplyKind};
use crate::error::{DecodeError, DecodeResult};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Stream name carried by the authorization acknowledgement
pub const AUTHORIZATION_STREAM: &str = "authorization";

/// Stream name carried by the listen acknowledgement
pub const LISTENING_STREAM: &str = "listening";

/// Set of channels to subscribe to, iterated in declaration order
pub type ChannelSet = BTreeSet<Channel>;

// ============================================================================
// Request Types
// ============================================================================

/// Authenticate action, the first message sent on a new connection
#[derive(Debug, Clone, Copy)]
pub struct AuthenticateRequest<'a> {
    /// API key id
    pub key_id: &'a str,
    /// API secret key
    pub secret_key: &'a str,
}

impl<'a> AuthenticateRequest<'a> {
    /// Create a new authenticate request
    pub fn new(key_id: &'a str, secret_key: &'a str) -> Self {
        Self { key_id, secret_key }
    }

    /// Convert to JSON message
    pub fn to_json(&self) -> Value {
        json!({
            "action": "authenticate",
            "data": {
                "key_id": self.key_id,
                "secret_key": self.secret_key,
            }
        })
    }
}

/// Listen action, sent once the server has authorized the connection
#[derive(Debug, Clone, Copy)]
pub struct ListenRequest<'a> {
    /// Channels to subscribe to
    pub channels: &'a ChannelSet,
}

impl<'a> ListenRequest<'a> {
    /// Create a new listen request
    pub fn new(channels: &'a ChannelSet) -> Self {
        Self { channels }
    }

    /// Convert to JSON message
    pub fn to_json(&self) -> Value {
        let streams: Vec<&str> = self.channels.iter().map(Channel::as_str).collect();
        json!({
            "action": "listen",
            "data": {
                "streams": streams,
            }
        })
    }
}

/// Build the authenticate message text.
///
/// Credentials are passed through verbatim; empty strings are the server's
/// problem to reject.
pub fn authentication_message(key_id: &str, secret_key: &str) -> String {
    AuthenticateRequest::new(key_id, secret_key).to_json().to_string()
}

/// Build the listen message text for `channels`
pub fn listen_message(channels: &ChannelSet) -> String {
    ListenRequest::new(channels).to_json().to_string()
}

// ============================================================================
// Reply Types
// ============================================================================

/// Result of the server's authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// Credentials accepted (also assumed when the reply carries no status)
    Authorized,
    /// Credentials rejected; the server closes the connection next
    Unauthorized,
}

/// One decoded inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Acknowledgement of the authenticate action
    Authorization {
        /// Whether the credentials were accepted
        status: AuthorizationStatus,
    },
    /// Acknowledgement of the listen action
    Listening {
        /// Stream names the server confirmed, verbatim
        streams: Vec<String>,
    },
    /// Data pushed on a channel
    Update {
        /// Channel the data belongs to
        channel: Channel,
        /// Serialized `data` object, empty when the frame had none
        payload: String,
    },
}

impl Reply {
    /// Returns the reply category
    pub fn kind(&self) -> ReplyKind {
        match self {
            Self::Authorization { .. } => ReplyKind::Authorization,
            Self::Listening { .. } => ReplyKind::Listening,
            Self::Update { .. } => ReplyKind::Update,
        }
    }

    /// Returns the channel for update replies
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::Update { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// Returns the update payload, empty for handshake replies
    pub fn payload(&self) -> &str {
        match self {
            Self::Update { payload, .. } => payload,
            _ => "",
        }
    }
}

/// Classification of a `stream` field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamName {
    /// `"authorization"`
    Authorization,
    /// `"listening"`
    Listening,
    /// A channel name such as `"trade_updates"`
    Channel(Channel),
}

impl StreamName {
    /// Returns the reply category this stream produces
    pub fn kind(&self) -> ReplyKind {
        match self {
            Self::Authorization => ReplyKind::Authorization,
            Self::Listening => ReplyKind::Listening,
            Self::Channel(_) => ReplyKind::Update,
        }
    }

    /// Returns the channel for data streams
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::Channel(channel) => Some(*channel),
            _ => None,
        }
    }
}

impl FromStr for StreamName {
    type Err = DecodeError;

    /// Unrecognized names are a hard error rather than an ignored reply.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AUTHORIZATION_STREAM => Ok(Self::Authorization),
            LISTENING_STREAM => Ok(Self::Listening),
            other => other.parse().map(Self::Channel),
        }
    }
}

/// Map a wire-level `stream` value to its reply kind and channel
pub fn classify(stream: &str) -> DecodeResult<StreamName> {
    stream.parse()
}

/// Decode one inbound text frame
pub fn decode_reply(text: &str) -> DecodeResult<Reply> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::parse)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let stream = object
        .get("stream")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("stream"))?;

    let data = object.get("data").filter(|data| data.is_object());

    let reply = match classify(stream)? {
        StreamName::Authorization => {
            let rejected = data
                .and_then(|data| data.get("status"))
                .and_then(Value::as_str)
                .map(|status| status == "unauthorized")
                .unwrap_or(false);
            Reply::Authorization {
                status: if rejected {
                    AuthorizationStatus::Unauthorized
                } else {
                    AuthorizationStatus::Authorized
                },
            }
        }
        StreamName::Listening => {
            let streams = data
                .and_then(|data| data.get("streams"))
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Reply::Listening { streams }
        }
        StreamName::Channel(channel) => Reply::Update {
            channel,
            payload: data.map(Value::to_string).unwrap_or_default(),
        },
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORIZATION_REPLY: &str =
        r#"{"stream":"authorization","data":{"action":"authenticate","status":"authorized"}}"#;
    const LISTENING_REPLY: &str =
        r#"{"stream":"listening","data":{"streams":["trade_updates","account_updates"]}}"#;

    fn channels(list: &[Channel]) -> ChannelSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_authentication_message_shape() {
        let text = authentication_message("AKID", "SECRET");
        assert_eq!(
            text,
            r#"{"action":"authenticate","data":{"key_id":"AKID","secret_key":"SECRET"}}"#
        );
    }

    #[test]
    fn test_authentication_message_escapes_credentials() {
        for (key, secret) in [("", ""), ("a\"b", "c\\d"), ("ключ", "line\nbreak")] {
            let value: Value = serde_json::from_str(&authentication_message(key, secret)).unwrap();
            assert_eq!(value["action"], "authenticate");
            assert_eq!(value["data"]["key_id"], key);
            assert_eq!(value["data"]["secret_key"], secret);
            assert_eq!(value["data"].as_object().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_listen_message_is_ordered_and_unique() {
        let forward = channels(&[Channel::TradeUpdates, Channel::AccountUpdates]);
        let backward = channels(&[Channel::AccountUpdates, Channel::TradeUpdates, Channel::AccountUpdates]);

        let text = listen_message(&forward);
        assert_eq!(text, listen_message(&backward));
        assert_eq!(
            text,
            r#"{"action":"listen","data":{"streams":["trade_updates","account_updates"]}}"#
        );

        let value: Value = serde_json::from_str(&listen_message(&channels(&[Channel::AccountUpdates]))).unwrap();
        assert_eq!(value["action"], "listen");
        assert_eq!(value["data"]["streams"], json!(["account_updates"]));
    }

    #[test]
    fn test_classify_table() {
        assert_eq!(classify("authorization").unwrap(), StreamName::Authorization);
        assert_eq!(classify("listening").unwrap(), StreamName::Listening);
        assert_eq!(
            classify("trade_updates").unwrap(),
            StreamName::Channel(Channel::TradeUpdates)
        );
        assert_eq!(
            classify("account_updates").unwrap(),
            StreamName::Channel(Channel::AccountUpdates)
        );
        assert_eq!(classify("account_updates").unwrap().kind(), ReplyKind::Update);
        assert_eq!(classify("listening").unwrap().channel(), None);
        assert_eq!(
            classify("Authorization").unwrap_err(),
            DecodeError::UnknownStream("Authorization".to_string())
        );
    }

    #[test]
    fn test_decode_handshake_replies() {
        let reply = decode_reply(AUTHORIZATION_REPLY).unwrap();
        assert_eq!(reply.kind(), ReplyKind::Authorization);
        assert_eq!(
            reply,
            Reply::Authorization { status: AuthorizationStatus::Authorized }
        );
        assert_eq!(reply.payload(), "");

        let reply = decode_reply(LISTENING_REPLY).unwrap();
        assert_eq!(reply.kind(), ReplyKind::Listening);
        assert_eq!(
            reply,
            Reply::Listening {
                streams: vec!["trade_updates".to_string(), "account_updates".to_string()]
            }
        );
    }

    #[test]
    fn test_decode_unauthorized() {
        let reply = decode_reply(
            r#"{"stream":"authorization","data":{"action":"authenticate","status":"unauthorized"}}"#,
        )
        .unwrap();
        assert_eq!(
            reply,
            Reply::Authorization { status: AuthorizationStatus::Unauthorized }
        );

        let reply = decode_reply(r#"{"stream":"authorization"}"#).unwrap();
        assert_eq!(
            reply,
            Reply::Authorization { status: AuthorizationStatus::Authorized }
        );
    }

    #[test]
    fn test_decode_update_captures_data() {
        let reply = decode_reply(
            r#"{"stream":"trade_updates","data":{"event":"fill","price":"179.08"}}"#,
        )
        .unwrap();
        assert_eq!(reply.kind(), ReplyKind::Update);
        assert_eq!(reply.channel(), Some(Channel::TradeUpdates));

        let payload: Value = serde_json::from_str(reply.payload()).unwrap();
        assert_eq!(payload, json!({"event": "fill", "price": "179.08"}));
    }

    #[test]
    fn test_decode_update_without_object_data() {
        let reply = decode_reply(r#"{"stream":"account_updates","data":[1,2]}"#).unwrap();
        assert_eq!(reply.channel(), Some(Channel::AccountUpdates));
        assert_eq!(reply.payload(), "");

        let reply = decode_reply(r#"{"stream":"account_updates"}"#).unwrap();
        assert_eq!(reply.payload(), "");
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(decode_reply("not json"), Err(DecodeError::ParseError(_))));
        assert_eq!(decode_reply(r#""a string""#).unwrap_err(), DecodeError::NotAnObject);
        assert_eq!(decode_reply("{}").unwrap_err(), DecodeError::MissingField("stream"));
        assert_eq!(
            decode_reply(r#"{"stream":42}"#).unwrap_err(),
            DecodeError::MissingField("stream")
        );
        assert_eq!(
            decode_reply(r#"{"stream":"bogus"}"#).unwrap_err(),
            DecodeError::UnknownStream("bogus".to_string())
        );
    }
}
