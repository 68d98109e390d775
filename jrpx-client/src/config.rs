//! Client configuration
//!
//! The three knobs of a client: where to send calls, how long to wait, and
//! whether to insist on the "2.0" protocol tag. Values come from code, from
//! the environment, or both.
//!
//! # Environment Variables
//!
//! - `JRPX_ENDPOINT`: endpoint URL (required by `from_env`)
//! - `JRPX_TIMEOUT_SECS`: timeout in seconds, fractional values allowed
//! - `JRPX_STRICT`: `true`/`false`, `1`/`0`, `yes`/`no`

use jrpx_core::{Error, Result};
use std::time::Duration;

/// Timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the endpoint URL
pub const ENV_ENDPOINT: &str = "JRPX_ENDPOINT";
/// Environment variable holding the timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "JRPX_TIMEOUT_SECS";
/// Environment variable holding the strict flag
pub const ENV_STRICT: &str = "JRPX_STRICT";

/// Configuration for an `RpcClient`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Endpoint URL; may embed `user:password@` credentials
    pub endpoint: String,
    /// Bound on each transport call
    pub timeout: Duration,
    /// Reject responses whose `jsonrpc` tag is not exactly "2.0"
    pub strict: bool,
}

impl ClientConfig {
    /// Configuration with default timeout (10 s) and strict mode on
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            strict: true,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read the configuration from `JRPX_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    ///
    /// `from_env` uses the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_ENDPOINT)))?;

        let mut config = Self::new(endpoint);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = lookup(ENV_STRICT) {
            config.strict = parse_bool(&raw)?;
        }

        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a number, got {:?}", ENV_TIMEOUT_SECS, raw)))?;
    Duration::try_from_secs_f64(secs).map_err(|_| {
        Error::Config(format!(
            "{} must be a non-negative number, got {:?}",
            ENV_TIMEOUT_SECS, raw
        ))
    })
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be a boolean, got {:?}",
            ENV_STRICT, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.strict);
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new("http://localhost")
            .with_timeout(Duration::from_millis(250))
            .with_strict(false);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(!config.strict);
    }

    #[test]
    fn test_from_lookup_full() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("JRPX_ENDPOINT", "http://rpc.local/api"),
            ("JRPX_TIMEOUT_SECS", "2.5"),
            ("JRPX_STRICT", "no"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://rpc.local/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert!(!config.strict);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("JRPX_ENDPOINT", "http://x")])).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.strict);
    }

    #[test]
    fn test_from_lookup_missing_endpoint() {
        let result = ClientConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ClientConfig::from_lookup(lookup(&[("JRPX_ENDPOINT", "  ")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_lookup_bad_values() {
        let result = ClientConfig::from_lookup(lookup(&[
            ("JRPX_ENDPOINT", "http://x"),
            ("JRPX_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ClientConfig::from_lookup(lookup(&[
            ("JRPX_ENDPOINT", "http://x"),
            ("JRPX_TIMEOUT_SECS", "-1"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ClientConfig::from_lookup(lookup(&[
            ("JRPX_ENDPOINT", "http://x"),
            ("JRPX_STRICT", "maybe"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
