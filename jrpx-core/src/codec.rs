//! Codec for JSON-RPC envelope serialization and deserialization
//!
//! The client never calls `serde_json` directly for wire text. It goes through
//! the [`Codec`] trait so an application can swap in its own encoder (a
//! SIMD parser, a pretty-printing codec for debugging, a fault-injecting one
//! for tests).
//!
//! # Error Handling
//!
//! - `encode` failures become `Error::Serialization` and propagate to the
//!   caller untouched
//! - `decode` failures are reported as [`DecodeError`]; the client turns them
//!   into `ExpectingJsonResponse`, keeping the raw body
//!
//! # Examples
//!
//! ```rust
//! use jrpx_core::codec::{Codec, JsonCodec};
//! use serde_json::json;
//!
//! let codec = JsonCodec;
//! let text = codec.encode(&json!({"method": "ping"})).unwrap();
//! assert_eq!(codec.decode(&text).unwrap(), json!({"method": "ping"}));
//! assert!(codec.decode("not json").is_err());
//! ```

use crate::error::{Error, Result};
use crate::types::RpcRequest;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Text could not be parsed as JSON
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DecodeError {
    /// Description of what went wrong, including position where known
    pub message: String,
}

impl DecodeError {
    /// Create a decode error from a description
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::new(err.to_string())
    }
}

/// Converts JSON values to wire text and back
///
/// Implementations must be shareable across tasks; the client holds one
/// behind an `Arc` and uses it from every call.
pub trait Codec: Send + Sync {
    /// Serialize a value to text
    fn encode(&self, value: &Value) -> Result<String>;

    /// Parse text into a value
    fn decode(&self, text: &str) -> std::result::Result<Value, DecodeError>;
}

/// Default codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<String> {
        encode(value)
    }

    fn decode(&self, text: &str) -> std::result::Result<Value, DecodeError> {
        serde_json::from_str(text).map_err(DecodeError::from)
    }
}

/// Encode any serializable message to a JSON string
///
/// # Errors
///
/// Returns `Error::Serialization` if the message cannot be serialized to JSON,
/// for instance a map with non-string keys.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Convert any serializable value into a JSON value
///
/// Used to turn call arguments and envelopes into something a [`Codec`] can
/// handle.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope with the given codec
pub fn encode_request(codec: &dyn Codec, req: &RpcRequest) -> Result<String> {
    codec.encode(&to_value(req)?)
}
