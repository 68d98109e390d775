//! Fluent method handles
//!
//! A [`MethodHandle`] is a dotted remote method name bound to a client. It is
//! a throwaway builder: composing a handle leaves the parent as it was, and
//! calling one simply forwards to [`RpcClient::call`].
//!
//! ```rust,no_run
//! use jrpx_client::RpcClient;
//! use serde_json::json;
//!
//! # async fn example() -> jrpx_core::Result<()> {
//! let client = RpcClient::new("http://localhost:8080/rpc")?;
//!
//! // Positional arguments
//! let sum = client
//!     .method("math")
//!     .child("add")
//!     .args()
//!     .arg(2)
//!     .arg(3)
//!     .send()
//!     .await?;
//! assert_eq!(sum, Some(json!(5)));
//!
//! // Named arguments
//! let user: serde_json::Value = client
//!     .method("users.get")
//!     .args()
//!     .named("id", 42)
//!     .send_typed()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! The `rpc!` macro from `jrpx-macros` expands to the same chain.

use crate::RpcClient;
use jrpx_core::{codec, Error, Params, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A remote method name bound to a client
#[derive(Clone)]
pub struct MethodHandle<'a> {
    client: &'a RpcClient,
    name: String,
}

impl<'a> MethodHandle<'a> {
    pub(crate) fn new(client: &'a RpcClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// A new handle for `self.name + "." + name`
    pub fn child(&self, name: impl AsRef<str>) -> MethodHandle<'a> {
        MethodHandle {
            client: self.client,
            name: format!("{}.{}", self.name, name.as_ref()),
        }
    }

    /// The full dotted method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name split on `.`
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// The client this handle calls through
    pub fn client(&self) -> &'a RpcClient {
        self.client
    }

    /// Call with positional or named arguments
    ///
    /// At most one of `args` and `kwargs` may be non-empty; supplying both
    /// fails with `Error::InvalidArguments` before anything is sent.
    pub async fn invoke(&self, args: Vec<Value>, kwargs: Map<String, Value>) -> Result<Option<Value>> {
        let params = Params::from_args(args, kwargs)?;
        self.client.call(&self.name, params).await
    }

    /// Call with ready-made params
    pub async fn call(&self, params: impl Into<Params>) -> Result<Option<Value>> {
        self.client.call(&self.name, params).await
    }

    /// Call with ready-made params and deserialize the result
    pub async fn call_typed<R: DeserializeOwned>(&self, params: impl Into<Params>) -> Result<R> {
        self.client.call_typed(&self.name, params).await
    }

    /// Start collecting arguments for a call
    pub fn args(&self) -> Invocation<'a> {
        Invocation {
            handle: self.clone(),
            positional: Vec::new(),
            named: Map::new(),
            error: None,
        }
    }
}

impl fmt::Display for MethodHandle<'_> {
    /// Exactly the dotted name, as sent on the wire
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for MethodHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandle")
            .field("name", &self.name)
            .field("endpoint", &self.client.printable_endpoint())
            .finish()
    }
}

/// Arguments being collected for one call
///
/// Serialization failures are remembered and reported by `send`, so the
/// builder chain itself never fails.
#[must_use = "an invocation does nothing until `send` is awaited"]
pub struct Invocation<'a> {
    handle: MethodHandle<'a>,
    positional: Vec<Value>,
    named: Map<String, Value>,
    error: Option<Error>,
}

impl<'a> Invocation<'a> {
    /// Append a positional argument
    pub fn arg<T: Serialize>(mut self, value: T) -> Self {
        match codec::to_value(&value) {
            Ok(v) => self.positional.push(v),
            Err(e) => self.remember(e),
        }
        self
    }

    /// Set a named argument
    pub fn named<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        match codec::to_value(&value) {
            Ok(v) => {
                self.named.insert(key.into(), v);
            }
            Err(e) => self.remember(e),
        }
        self
    }

    fn remember(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// The handle being invoked
    pub fn handle(&self) -> &MethodHandle<'a> {
        &self.handle
    }

    /// Perform the call
    pub async fn send(self) -> Result<Option<Value>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.handle.invoke(self.positional, self.named).await
    }

    /// Perform the call and deserialize the result
    pub async fn send_typed<R: DeserializeOwned>(self) -> Result<R> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let params = Params::from_args(self.positional, self.named)?;
        self.handle.call_typed(params).await
    }
}
