//! The `decode(json)` contract implemented by every resource model

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, DecodeResult};

/// Decode a resource from the JSON text of a single object.
///
/// Stream callbacks receive payloads as raw text; this is how callers turn
/// them into typed values:
///
/// ```
/// use alpaca_types::{AccountUpdate, Decode};
///
/// let payload = r#"{"id":"ef505a9a","created_at":"2018-10-01T13:35:25Z",
///     "updated_at":null,"deleted_at":null,"status":"ACTIVE",
///     "currency":"USD","cash":"1241.54","cash_withdrawable":"523.71"}"#;
/// let update = AccountUpdate::decode(payload).unwrap();
/// assert_eq!(update.status, "ACTIVE");
/// ```
pub trait Decode: DeserializeOwned {
    /// Parse `json` and map it onto `Self`
    fn decode(json: &str) -> DecodeResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(DecodeError::parse)?;
        Self::decode_value(value)
    }

    /// Map an already-parsed JSON value onto `Self`
    fn decode_value(value: Value) -> DecodeResult<Self> {
        if !value.is_object() {
            return Err(DecodeError::NotAnObject);
        }
        serde_json::from_value(value).map_err(DecodeError::invalid)
    }
}
