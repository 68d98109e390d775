//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by `RpcClient::call` when metrics are
//! attached through `ClientBuilder::with_metrics` or
//! `ClientBuilder::with_observability`.
//!
//! # Metrics Collected
//!
//! - **jrpx.client.calls.total**: calls made, by method and outcome (counter)
//! - **jrpx.client.call.duration**: round-trip latency in seconds (histogram)
//! - **jrpx.client.errors.total**: failures, by error kind (counter)
//!
//! # Examples
//!
//! ```rust,no_run
//! use jrpx_client::ClientMetrics;
//!
//! let metrics = ClientMetrics::new("my-client");
//! metrics.record_call("math.add", "success", 0.012);
//! metrics.record_error(&jrpx_core::Error::Timeout);
//! ```

use jrpx_core::Error;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
#[derive(Clone)]
pub struct ClientMetrics {
    /// Total number of calls
    pub calls_total: Counter<u64>,
    /// Call duration in seconds
    pub call_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            calls_total: meter
                .u64_counter("jrpx.client.calls.total")
                .with_description("Total number of JSON-RPC calls made")
                .build(),
            call_duration: meter
                .f64_histogram("jrpx.client.call.duration")
                .with_description("JSON-RPC call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("jrpx.client.errors.total")
                .with_description("Total number of failed JSON-RPC calls")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_call(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.calls_total.add(1, attributes);
        self.call_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    ///
    /// Labelled with the error kind (see `Error::label`) and whether the
    /// server reported it or the client raised it.
    pub fn record_error(&self, error: &Error) {
        let server_reported = error
            .rpc_kind()
            .is_some_and(|kind| kind.is_server_reported());
        let attributes = &[
            KeyValue::new("error_kind", error.label()),
            KeyValue::new("server_reported", server_reported),
        ];
        self.errors_total.add(1, attributes);
    }
}
