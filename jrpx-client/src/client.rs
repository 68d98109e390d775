//! JSON-RPC client implementation over HTTP
//!
//! This module provides `RpcClient`, which owns the endpoint configuration
//! and runs one JSON-RPC exchange per call.
//!
//! # Call Lifecycle
//!
//! 1. **Build**: wrap method and params in an envelope with a fresh id
//! 2. **Encode**: serialize the envelope through the codec
//! 3. **Send**: one POST through the transport, bounded by the timeout
//! 4. **Status**: anything but 200 is an `Error::Http`
//! 5. **Decode**: the body must be a JSON object
//! 6. **Version**: `jsonrpc` must be "2.0" (strict mode only)
//! 7. **Correlate**: the response `id` must echo the request `id`
//! 8. **Error**: a truthy `error` member is classified and returned
//! 9. **Result**: otherwise the `result` member is handed back
//!
//! Steps 4 to 9 always run in this order, so when a response is wrong in
//! several ways at once the earliest check decides which error is reported.
//!
//! # Cloning
//!
//! `RpcClient` is cheaply cloneable using `Arc` internally. Clones share the
//! configuration, transport and codec. Nothing in it is mutable, so any number
//! of tasks can call through it at once.

use crate::metrics::ClientMetrics;
use crate::method::MethodHandle;
use crate::request::build_request;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{ClientBuilder, ClientConfig};
use jrpx_core::{codec, Codec, Error, Params, Result, RpcError, RpcResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// JSON-RPC client over HTTP
#[derive(Clone)]
pub struct RpcClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    endpoint: String,
    printable_endpoint: String,
    timeout: Duration,
    strict: bool,
    transport: Arc<dyn Transport>,
    codec: Arc<dyn Codec>,
    metrics: Option<Arc<ClientMetrics>>,
}

impl RpcClient {
    /// Create a client with the default transport, a 10 second timeout and
    /// strict mode on
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(endpoint).build()
    }

    /// Create a client from a `ClientConfig`
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// Start configuring a client
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        codec: Arc<dyn Codec>,
        metrics: Option<Arc<ClientMetrics>>,
    ) -> Self {
        let printable_endpoint = jrpx_core::mask_url_password(&config.endpoint);
        Self {
            inner: Arc::new(ClientInner {
                endpoint: config.endpoint,
                printable_endpoint,
                timeout: config.timeout,
                strict: config.strict,
                transport,
                codec,
                metrics,
            }),
        }
    }

    /// The endpoint URL, credentials included
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// The endpoint URL with any password masked, for display
    pub fn printable_endpoint(&self) -> &str {
        &self.inner.printable_endpoint
    }

    /// Timeout applied to every call
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Whether responses must carry `"jsonrpc": "2.0"`
    pub fn is_strict(&self) -> bool {
        self.inner.strict
    }

    /// Handle for a remote method
    ///
    /// Chain [`MethodHandle::child`] to reach nested names:
    ///
    /// ```rust,no_run
    /// # async fn example() -> jrpx_core::Result<()> {
    /// let client = jrpx_client::RpcClient::new("http://localhost:8080/rpc")?;
    /// let users = client.method("admin").child("users");
    /// assert_eq!(users.child("list").to_string(), "admin.users.list");
    /// # Ok(())
    /// # }
    /// ```
    pub fn method(&self, name: impl Into<String>) -> MethodHandle<'_> {
        MethodHandle::new(self, name)
    }

    /// Call a remote method
    ///
    /// Returns the `result` member of the response, or `None` when the
    /// server sent no result (or `null`).
    #[tracing::instrument(skip(self, params), fields(method = %method))]
    pub async fn call(&self, method: &str, params: impl Into<Params>) -> Result<Option<Value>> {
        let start = Instant::now();
        let outcome = self.exchange(method, params.into()).await;

        if let Some(ref m) = self.inner.metrics {
            let duration = start.elapsed().as_secs_f64();
            match &outcome {
                Ok(_) => m.record_call(method, "success", duration),
                Err(e) => {
                    m.record_call(method, "error", duration);
                    m.record_error(e);
                }
            }
        }

        outcome
    }

    /// Call a remote method and deserialize its result
    ///
    /// A missing result deserializes from `null`, so `R = ()` or
    /// `R = Option<T>` accept it.
    pub async fn call_typed<R>(&self, method: &str, params: impl Into<Params>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let result = self.call(method, params).await?;
        serde_json::from_value(result.unwrap_or(Value::Null))
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn exchange(&self, method: &str, params: Params) -> Result<Option<Value>> {
        let request = build_request(method, params);

        let params = request.params.clone().unwrap_or_default();
        tracing::debug!(
            "Calling {} `{}` with params: {}",
            self.inner.printable_endpoint,
            method,
            params
        );

        let body = codec::encode_request(self.inner.codec.as_ref(), &request)?;
        let response = self
            .inner
            .transport
            .post(HttpRequest::json(
                self.inner.endpoint.clone(),
                body,
                self.inner.timeout,
            ))
            .await?;

        tracing::debug!(status = response.status, "Response data: {}", response.body);

        self.process_response(&request.id, response)
    }

    /// Validate one HTTP response against the request it answers
    fn process_response(&self, request_id: &str, response: HttpResponse) -> Result<Option<Value>> {
        if response.status != 200 {
            return Err(Error::Http {
                code: response.status,
                message: response.body,
            });
        }

        let decoded = self
            .inner
            .codec
            .decode(&response.body)
            .map_err(|e| RpcError::expecting_json(e.message, &response.body))?;

        if !decoded.is_object() {
            return Err(RpcError::expecting_json("response is not a JSON object", &response.body).into());
        }

        let data: RpcResponse = serde_json::from_value(decoded)
            .map_err(|e| RpcError::expecting_json(e.to_string(), &response.body))?;

        if self.inner.strict && !data.has_version() {
            return Err(RpcError::unsupported_version(data.version()).into());
        }

        if !data.id_matches(request_id) {
            return Err(RpcError::identifier_mismatch().into());
        }

        if let Some(error) = data.error_value() {
            return Err(RpcError::from_error_value(error).into());
        }

        Ok(data.result)
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.inner.printable_endpoint)
            .field("timeout", &self.inner.timeout)
            .field("strict", &self.inner.strict)
            .finish()
    }
}
