//! Error types for jrpx
//!
//! This module defines everything a call can fail with. There are two layers:
//!
//! - **Error**: the top-level error returned by every client operation
//!   (uses thiserror)
//! - **RpcError**: a JSON-RPC level failure, discriminated by `RpcErrorKind`
//!
//! # Error Categories
//!
//! - **Local validation**: `Error::InvalidArguments`
//! - **Transport**: `Error::Http`, `Error::Transport`, `Error::Timeout`
//! - **Framing**: `RpcErrorKind::ExpectingJsonResponse`
//! - **Protocol**: `RpcErrorKind::UnsupportedJsonRpcVersion`,
//!   `RpcErrorKind::IdentifierMismatch`
//! - **Server-reported**: every other `RpcErrorKind`, produced by [`classify`]
//!
//! # Spec-Compliant Error Codes
//!
//! JSON-RPC 2.0 reserves these codes:
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//! - `-32099 to -32000`: Server error (implementation-defined)
//!
//! # Examples
//!
//! ```rust
//! use jrpx_core::{classify, RpcErrorKind};
//!
//! let err = classify(-32601, Some("no such method".into()), None);
//! assert_eq!(err.kind, RpcErrorKind::MethodNotFound);
//! assert_eq!(err.message.as_deref(), Some("no such method"));
//!
//! assert_eq!(classify(-32050, None, None).kind, RpcErrorKind::ServerError);
//! assert_eq!(classify(-1, None, None).kind, RpcErrorKind::UnknownServerError);
//! ```

use serde_json::Value;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Result type for jrpx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid JSON was received by the server
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist or is not available
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters
pub const INVALID_PARAMS: i64 = -32602;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i64 = -32603;
/// Codes reserved for implementation-defined server errors
pub const SERVER_ERROR_RANGE: RangeInclusive<i64> = -32099..=-32000;

/// Top-level error type for every jrpx operation
///
/// Nothing in the client recovers from, retries or suppresses these; each one
/// is handed straight to the caller of the operation that produced it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// JSON-RPC failure: framing, protocol validation or a server-reported error
    #[error("JSON-RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The endpoint answered with a status other than 200
    ///
    /// `message` holds the raw response body.
    #[error("HTTP error {code}: {message}")]
    Http {
        /// HTTP status code
        code: u16,
        /// Raw response body
        message: String,
    },

    /// Positional and named arguments were mixed in a single call
    ///
    /// Raised locally before anything goes over the wire.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Connection-level failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up after the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Serialization of the request envelope or an argument failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The JSON-RPC error kind, if this is an `Error::Rpc`
    pub fn rpc_kind(&self) -> Option<RpcErrorKind> {
        match self {
            Error::Rpc(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Stable, low-cardinality label used for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Error::Rpc(err) => err.kind.as_str(),
            Error::Http { .. } => "http",
            Error::InvalidArguments(_) => "invalid_arguments",
            Error::Transport(_) => "transport",
            Error::Timeout => "timeout",
            Error::Serialization(_) => "serialization",
            Error::Config(_) => "config",
        }
    }
}

/// Discriminator for JSON-RPC level failures
///
/// The first seven kinds come from the server's `error` object and are chosen
/// by [`classify`]. The last three are raised by the client itself while
/// validating a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorKind {
    /// -32700
    ParseError,
    /// -32600
    InvalidRequest,
    /// -32601
    MethodNotFound,
    /// -32602
    InvalidParams,
    /// -32603
    InternalError,
    /// Any code in -32099..=-32000 not listed above
    ServerError,
    /// Any code outside the reserved set
    UnknownServerError,
    /// The response's `jsonrpc` tag was missing or not "2.0" (strict mode only)
    UnsupportedJsonRpcVersion,
    /// The response `id` did not echo the request `id`
    IdentifierMismatch,
    /// The response body was not a JSON object
    ExpectingJsonResponse,
}

impl RpcErrorKind {
    /// Map a server error code onto a kind
    ///
    /// Total over `i64`: every code lands on exactly one server-side kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            PARSE_ERROR => RpcErrorKind::ParseError,
            INVALID_REQUEST => RpcErrorKind::InvalidRequest,
            METHOD_NOT_FOUND => RpcErrorKind::MethodNotFound,
            INVALID_PARAMS => RpcErrorKind::InvalidParams,
            INTERNAL_ERROR => RpcErrorKind::InternalError,
            c if SERVER_ERROR_RANGE.contains(&c) => RpcErrorKind::ServerError,
            _ => RpcErrorKind::UnknownServerError,
        }
    }

    /// Whether this kind was reported by the server rather than raised locally
    pub fn is_server_reported(&self) -> bool {
        !matches!(
            self,
            RpcErrorKind::UnsupportedJsonRpcVersion
                | RpcErrorKind::IdentifierMismatch
                | RpcErrorKind::ExpectingJsonResponse
        )
    }

    /// Snake-case name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcErrorKind::ParseError => "parse_error",
            RpcErrorKind::InvalidRequest => "invalid_request",
            RpcErrorKind::MethodNotFound => "method_not_found",
            RpcErrorKind::InvalidParams => "invalid_params",
            RpcErrorKind::InternalError => "internal_error",
            RpcErrorKind::ServerError => "server_error",
            RpcErrorKind::UnknownServerError => "unknown_server_error",
            RpcErrorKind::UnsupportedJsonRpcVersion => "unsupported_jsonrpc_version",
            RpcErrorKind::IdentifierMismatch => "identifier_mismatch",
            RpcErrorKind::ExpectingJsonResponse => "expecting_json_response",
        }
    }
}

impl fmt::Display for RpcErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON-RPC level failure
///
/// One payload shape for every kind. Which fields are populated depends on
/// where the failure came from:
///
/// | kind | message | code | data |
/// |---|---|---|---|
/// | server-reported | server `message` | server `code` | server `data` |
/// | `UnsupportedJsonRpcVersion` | offending version | - | - |
/// | `IdentifierMismatch` | - | - | - |
/// | `ExpectingJsonResponse` | decode failure | - | raw body |
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    /// What went wrong
    pub kind: RpcErrorKind,
    /// Human-readable description, passed through unchanged from the server
    pub message: Option<String>,
    /// Numeric code as reported by the server
    pub code: Option<i64>,
    /// Additional error data, passed through unchanged from the server
    pub data: Option<Value>,
}

impl RpcError {
    /// Create an error of the given kind with no payload
    pub fn new(kind: RpcErrorKind) -> Self {
        Self {
            kind,
            message: None,
            code: None,
            data: None,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach error data
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The response tag did not match "2.0"
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::new(RpcErrorKind::UnsupportedJsonRpcVersion).with_message(version)
    }

    /// The response id did not echo the request id
    pub fn identifier_mismatch() -> Self {
        Self::new(RpcErrorKind::IdentifierMismatch)
    }

    /// The body could not be read as a JSON-RPC response object
    ///
    /// The raw body is kept as a JSON string in `data`.
    pub fn expecting_json(description: impl Into<String>, body: &str) -> Self {
        Self::new(RpcErrorKind::ExpectingJsonResponse)
            .with_message(description)
            .with_data(Value::String(body.to_string()))
    }

    /// Build an error from the `error` member of a response
    ///
    /// Well-formed objects go through [`classify`]. An integral float code
    /// (`-32601.0`) counts as that integer. Anything else (an object without
    /// an integral `code`, or a value that is not an object at all) becomes
    /// `UnknownServerError` without a code.
    pub fn from_error_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::new(RpcErrorKind::UnknownServerError).with_data(value.clone());
        };

        let message = obj.get("message").and_then(|m| match m {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        let data = obj.get("data").filter(|d| !d.is_null()).cloned();

        match obj.get("code").and_then(integral_code) {
            Some(code) => classify(code, message, data),
            None => Self {
                kind: RpcErrorKind::UnknownServerError,
                message,
                code: None,
                data,
            },
        }
    }
}

fn integral_code(value: &Value) -> Option<i64> {
    if let Some(code) = value.as_i64() {
        return Some(code);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for RpcError {
    /// Formats as "kind [code]: message", omitting the parts that are absent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcError {}

/// Map a server-reported error onto the typed taxonomy
///
/// The five standard codes map to their own kinds, the rest of the reserved
/// server band maps to `ServerError`, and everything else to
/// `UnknownServerError`. `message` and `data` are carried through as-is.
pub fn classify(code: i64, message: Option<String>, data: Option<Value>) -> RpcError {
    RpcError {
        kind: RpcErrorKind::from_code(code),
        message,
        code: Some(code),
        data,
    }
}
