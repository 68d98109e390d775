//! Request construction for the JSON-RPC client
//!
//! Every call gets its own envelope with a fresh correlation id. There is no
//! pending-request table: HTTP gives one response per POST, so the id only has
//! to be checked against the single response that comes back.
//!
//! # Ids
//!
//! Ids are 128 random bits rendered as 32 lowercase hex digits. Concurrent
//! calls from any number of tasks never need to coordinate to stay unique.

use jrpx_core::{Params, RpcRequest};

/// Generate a new unique request id
pub fn next_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Build the envelope for one call
pub fn build_request(method: &str, params: Params) -> RpcRequest {
    RpcRequest::new(method, params, next_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = next_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_build_request() {
        let req = build_request("ns.method", vec![json!(1)].into());
        assert_eq!(req.method, "ns.method");
        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.params, Some(json!([1])));
        assert_eq!(req.id.len(), 32);
    }

    #[test]
    fn test_each_request_gets_fresh_id() {
        let a = build_request("m", Params::None);
        let b = build_request("m", Params::None);
        assert_ne!(a.id, b.id);
    }
}
