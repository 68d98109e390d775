//! Debug logging of calls
//!
//! Captures the `tracing` output of a call and checks what reaches the log:
//! the endpoint with its password masked, the method, the params and the raw
//! response body.

use jrpx::RpcClient;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_debug_logs() -> (Capture, tracing::subscriber::DefaultGuard) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("jrpx_client=debug")
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

#[tokio::test]
async fn test_call_logs_masked_endpoint_and_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;
    let authority = server.uri().trim_start_matches("http://").to_string();
    let client = RpcClient::new(format!("http://ops:s3cr3t@{}/rpc", authority)).unwrap();

    let (logs, _guard) = capture_debug_logs();
    let result = client.call("jobs.retry", vec![json!(17)]).await;
    assert!(result.is_err());

    let logs = logs.contents();
    assert!(logs.contains("ops:*****@"), "logs: {}", logs);
    assert!(!logs.contains("s3cr3t"), "logs: {}", logs);
    assert!(logs.contains("jobs.retry"));
    assert!(logs.contains("[17]"));
    // The body is logged even when the status check fails
    assert!(logs.contains("backend down"));
}

#[tokio::test]
async fn test_server_error_logs_only_the_two_call_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(|request: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": {"code": -32601, "message": "Method not found"},
            }))
        })
        .mount(&server)
        .await;
    let client = RpcClient::new(format!("{}/rpc", server.uri())).unwrap();

    let (logs, _guard) = capture_debug_logs();
    let result = client.call("missing", ()).await;
    assert!(result.is_err());

    let logs = logs.contents();
    let records: Vec<&str> = logs.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(records.len(), 2, "logs: {}", logs);
    assert!(records[0].contains("Calling"));
    assert!(records[1].contains("Method not found"));
}
