//! Core JSON-RPC 2.0 types, error taxonomy and codec for jrpx
//!
//! This crate provides the transport-independent half of the jrpx client:
//!
//! - **Types**: request/response envelopes and call parameters
//! - **Error handling**: the `Error` / `RpcError` taxonomy and the code mapping
//! - **Codec**: the pluggable JSON encoder/decoder
//! - **URL masking**: hiding credentials before an endpoint is logged
//! - **Observability**: `tracing` and OpenTelemetry bootstrap
//!
//! `jrpx-client` builds the HTTP client on top of this.
//!
//! # Example
//!
//! ```rust
//! use jrpx_core::{codec, RpcRequest};
//! use serde_json::json;
//!
//! let request = RpcRequest::new("math.add", vec![json!(5), json!(3)].into(), "c0ffee");
//! let text = codec::encode_request(&codec::JsonCodec, &request).unwrap();
//! assert!(text.contains("\"method\":\"math.add\""));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;
pub mod url;

pub use codec::{Codec, DecodeError, JsonCodec};
pub use error::{classify, Error, Result, RpcError, RpcErrorKind};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{is_truthy, Params, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use url::mask_url_password;
