//! JSON-RPC 2.0 envelope types
//!
//! This module holds the data that goes over the wire for one call:
//!
//! - **Params**: the arguments of a call, positional or named
//! - **RpcRequest**: the outbound envelope
//! - **RpcResponse**: the inbound envelope, deliberately untyped
//!
//! # Why is the response untyped?
//!
//! Every field of `RpcResponse` is an optional `serde_json::Value`. Servers in
//! the wild send odd things (numeric versions, numeric ids, `"error": null`)
//! and the client has to decide which of those are acceptable by applying the
//! protocol checks in a fixed order. Letting serde reject a response early
//! would surface the wrong error.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol tag carried by every request and expected on every response
pub const JSONRPC_VERSION: &str = "2.0";

/// Arguments of a single call
///
/// A call takes either positional or named arguments, never both.
/// Empty collections are treated the same as `Params::None` and are left off
/// the wire.
///
/// # Examples
///
/// ```rust
/// use jrpx_core::Params;
/// use serde_json::json;
///
/// let positional = Params::positional(vec![json!(1), json!(2)]);
/// assert_eq!(positional.into_value(), Some(json!([1, 2])));
///
/// let empty = Params::positional(vec![]);
/// assert!(empty.is_empty());
/// assert_eq!(empty.into_value(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No arguments
    #[default]
    None,
    /// Ordered list of arguments
    Positional(Vec<Value>),
    /// Keyed arguments, in insertion order
    Named(Map<String, Value>),
}

impl Params {
    /// Positional arguments
    pub fn positional(args: Vec<Value>) -> Self {
        Params::Positional(args)
    }

    /// Named arguments
    pub fn named(kwargs: Map<String, Value>) -> Self {
        Params::Named(kwargs)
    }

    /// Pick positional or named arguments, whichever was supplied
    ///
    /// Fails with `Error::InvalidArguments` when both are non-empty.
    pub fn from_args(args: Vec<Value>, kwargs: Map<String, Value>) -> Result<Self> {
        match (args.is_empty(), kwargs.is_empty()) {
            (false, false) => Err(Error::InvalidArguments(
                "use positional or named arguments, not both".to_string(),
            )),
            (false, true) => Ok(Params::Positional(args)),
            (true, false) => Ok(Params::Named(kwargs)),
            (true, true) => Ok(Params::None),
        }
    }

    /// Whether these params are omitted from the wire
    pub fn is_empty(&self) -> bool {
        match self {
            Params::None => true,
            Params::Positional(args) => args.is_empty(),
            Params::Named(kwargs) => kwargs.is_empty(),
        }
    }

    /// The `params` member of the request, or `None` when it is omitted
    pub fn into_value(self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        match self {
            Params::Positional(args) => Some(Value::Array(args)),
            Params::Named(kwargs) => Some(Value::Object(kwargs)),
            Params::None => None,
        }
    }
}

impl From<Vec<Value>> for Params {
    fn from(args: Vec<Value>) -> Self {
        Params::Positional(args)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(kwargs: Map<String, Value>) -> Self {
        Params::Named(kwargs)
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::None
    }
}

impl<T: Into<Params>> From<Option<T>> for Params {
    fn from(params: Option<T>) -> Self {
        params.map(Into::into).unwrap_or_default()
    }
}

impl TryFrom<Value> for Params {
    type Error = Error;

    /// Arrays become positional, objects named, and `null` no params at all
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Params::None),
            Value::Array(args) => Ok(Params::Positional(args)),
            Value::Object(kwargs) => Ok(Params::Named(kwargs)),
            other => Err(Error::InvalidArguments(format!(
                "params must be an array or an object, got {}",
                other
            ))),
        }
    }
}

/// JSON-RPC 2.0 request envelope
///
/// Fields serialize in the order `method`, `id`, `jsonrpc`, `params`.
/// `params` is left out entirely (not sent as `null`) when the call has no
/// arguments.
///
/// # Examples
///
/// ```rust
/// use jrpx_core::{Params, RpcRequest};
///
/// let req = RpcRequest::new("system.ping", Params::None, "abc123");
/// let json = serde_json::to_string(&req).unwrap();
/// assert_eq!(json, r#"{"method":"system.ping","id":"abc123","jsonrpc":"2.0"}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Dotted name of the remote method
    pub method: String,
    /// Correlation id, echoed back by the server
    pub id: String,
    /// Always "2.0"
    pub jsonrpc: String,
    /// Call arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RpcRequest {
    /// Create a request envelope
    pub fn new(method: impl Into<String>, params: Params, id: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            id: id.into(),
            jsonrpc: JSONRPC_VERSION.to_string(),
            params: params.into_value(),
        }
    }
}

/// JSON-RPC 2.0 response envelope, as received
///
/// `null` members deserialize to `None`, the same as missing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<Value>,
    /// Echo of the request id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Call result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RpcResponse {
    /// The protocol tag as text, `""` when it is absent or falsy
    ///
    /// Non-string tags are rendered as JSON so they can be reported.
    pub fn version(&self) -> String {
        match self.jsonrpc {
            Some(Value::String(ref s)) => s.clone(),
            Some(ref v) if is_truthy(v) => v.to_string(),
            _ => String::new(),
        }
    }

    /// Whether the protocol tag is exactly the string "2.0"
    ///
    /// A numeric `2.0` does not count.
    pub fn has_version(&self) -> bool {
        matches!(self.jsonrpc, Some(Value::String(ref s)) if s == JSONRPC_VERSION)
    }

    /// Whether the response echoes the given request id exactly
    pub fn id_matches(&self, request_id: &str) -> bool {
        matches!(self.id, Some(Value::String(ref id)) if id == request_id)
    }

    /// The error object, if one is present and truthy
    ///
    /// `"error": null`, `"error": {}` and friends count as no error.
    pub fn error_value(&self) -> Option<&Value> {
        self.error.as_ref().filter(|e| is_truthy(e))
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
