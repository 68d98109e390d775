//! JRPX - Damn simple JSON-RPC 2.0 client over HTTP
//!
//! This is the main convenience crate that re-exports all JRPX sub-crates.
//! Use this crate if you want a single dependency that provides the client,
//! the core types and the `rpc!` macro.
//!
//! # Architecture
//!
//! JRPX is organized into modular crates:
//!
//! - **jrpx-core**: Envelope types, error taxonomy, codec, URL masking, observability
//! - **jrpx-client**: HTTP JSON-RPC client, method handles, transport seam
//! - **jrpx-macros**: The `rpc!` call macro
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jrpx::{rpc, RpcClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new("http://localhost:8080/rpc")?;
//!
//!     // Plain call
//!     let sum = client.call("math.add", vec![json!(5), json!(3)]).await?;
//!     println!("Sum: {:?}", sum);
//!
//!     // Same call through the macro
//!     let sum = rpc!(client => math.add(5, 3)).await?;
//!     println!("Sum: {:?}", sum);
//!
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from sub-crates
pub use jrpx_client as client;
pub use jrpx_core as core;
pub use jrpx_macros as macros;

// Convenience re-exports of the most commonly used types
pub use jrpx_client::{
    ClientBuilder, ClientConfig, Error, MethodHandle, Params, Result, RpcClient, RpcError,
    RpcErrorKind,
};
pub use jrpx_macros::rpc;
