//! Common test utilities for jrpx-client integration tests
//!
//! This module provides a mock JSON-RPC endpoint built on `wiremock`. The
//! client generates a fresh random id for every call, so canned responses
//! cannot know it up front; [`EchoId`] copies the id out of each request into
//! its response.

#![allow(dead_code)]

use jrpx_client::RpcClient;
use serde_json::{json, Map, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Path the mock endpoint listens on
pub const RPC_PATH: &str = "/rpc";

/// Responds 200 with a JSON-RPC envelope that echoes the request id
///
/// `fields` are merged into the envelope, so `{"result": 1}` yields
/// `{"jsonrpc": "2.0", "id": <request id>, "result": 1}`. A field set to
/// `null` is sent as `null`; use [`EchoId::without`] to drop a field.
#[derive(Clone)]
pub struct EchoId {
    fields: Map<String, Value>,
    removed: Vec<String>,
}

impl EchoId {
    pub fn new(fields: Value) -> Self {
        Self {
            fields: fields.as_object().cloned().unwrap_or_default(),
            removed: Vec::new(),
        }
    }

    /// Envelope carrying `result`
    pub fn result(result: Value) -> Self {
        Self::new(json!({ "result": result }))
    }

    /// Envelope carrying a server error object
    pub fn error(code: i64, message: &str) -> Self {
        Self::new(json!({ "error": { "code": code, "message": message } }))
    }

    /// Leave `field` out of the envelope entirely
    pub fn without(mut self, field: &str) -> Self {
        self.removed.push(field.to_string());
        self
    }
}

impl Respond for EchoId {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let incoming: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        let mut body = Map::new();
        body.insert("jsonrpc".to_string(), json!("2.0"));
        body.insert("id".to_string(), incoming["id"].clone());
        for (k, v) in &self.fields {
            body.insert(k.clone(), v.clone());
        }
        for k in &self.removed {
            body.remove(k);
        }

        ResponseTemplate::new(200).set_body_json(Value::Object(body))
    }
}

/// Start a server whose every JSON POST to `/rpc` is answered by `responder`
pub async fn rpc_server<R: Respond + 'static>(responder: R) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(responder)
        .mount(&server)
        .await;
    server
}

/// Start a server answering every POST with a fixed status and raw body
pub async fn raw_server(status: u16, body: &str) -> MockServer {
    rpc_server(ResponseTemplate::new(status).set_body_string(body)).await
}

/// Endpoint URL of a mock server
pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), RPC_PATH)
}

/// Strict client with a short timeout, pointed at the mock server
pub fn client_for(server: &MockServer) -> RpcClient {
    RpcClient::builder(endpoint(server))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

/// The JSON bodies the server has received so far
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
        .collect()
}
