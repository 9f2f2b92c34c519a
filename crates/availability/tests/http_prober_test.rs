//! Integration tests for HttpProber against a local HTTP server

use availability::{EndpointSpec, HttpProber, ProbeError, Prober};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{any, get};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A request as seen by the test server
#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    headers: HeaderMap,
    body: String,
}

type Requests = Arc<Mutex<Vec<Captured>>>;

async fn echo(
    State(requests): State<Requests>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    requests.lock().unwrap().push(Captured {
        method,
        headers,
        body,
    });
    StatusCode::OK
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(500)).await;
    "late"
}

/// Helper to start the test server, returning its base URL
async fn spawn_server() -> (String, Requests) {
    let requests = Requests::default();
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/status/:code", get(status))
        .route("/slow", get(slow))
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

fn endpoint(url: String, method: &str, body: &str) -> EndpointSpec {
    EndpointSpec {
        name: "test".to_string(),
        url,
        method: method.to_string(),
        body: body.to_string(),
        ..EndpointSpec::default()
    }
}

#[tokio::test]
async fn test_get_sends_empty_body() {
    let (base, requests) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    let outcome = prober
        .probe(&endpoint(format!("{}/echo", base), "get", "{\"ignored\":true}"))
        .await;
    assert_eq!(outcome.status_code, Some(200));
    assert!(outcome.error.is_none());

    let captured = requests.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].method, Method::GET);
    assert!(captured[0].body.is_empty());
}

#[tokio::test]
async fn test_empty_method_defaults_to_get() {
    let (base, requests) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    prober.probe(&endpoint(format!("{}/echo", base), "", "body")).await;

    let captured = requests.lock().unwrap().clone();
    assert_eq!(captured[0].method, Method::GET);
    assert!(captured[0].body.is_empty());
}

#[tokio::test]
async fn test_mutating_methods_send_body() {
    let (base, requests) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    for method in ["post", "PUT", "Patch"] {
        let outcome = prober
            .probe(&endpoint(format!("{}/echo", base), method, "{\"ping\":1}"))
            .await;
        assert_eq!(outcome.status_code, Some(200));
    }

    let captured = requests.lock().unwrap().clone();
    let methods: Vec<_> = captured.iter().map(|c| c.method.clone()).collect();
    assert_eq!(methods, vec![Method::POST, Method::PUT, Method::PATCH]);
    assert!(captured.iter().all(|c| c.body == "{\"ping\":1}"));
}

#[tokio::test]
async fn test_headers_are_applied() {
    let (base, requests) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    let mut spec = endpoint(format!("{}/echo", base), "GET", "");
    spec.headers.insert("X-Probe".to_string(), "availability".to_string());
    spec.headers.insert("Authorization".to_string(), "Bearer token".to_string());
    prober.probe(&spec).await;

    let captured = requests.lock().unwrap().clone();
    assert_eq!(captured[0].headers["x-probe"], "availability");
    assert_eq!(captured[0].headers["authorization"], "Bearer token");
}

#[tokio::test]
async fn test_status_code_is_captured() {
    let (base, _) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    let outcome = prober.probe(&endpoint(format!("{}/status/503", base), "GET", "")).await;
    assert_eq!(outcome.status_code, Some(503));
    assert!(outcome.error.is_none());

    let outcome = prober.probe(&endpoint(format!("{}/status/204", base), "GET", "")).await;
    assert_eq!(outcome.status_code, Some(204));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let (base, _) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_millis(100)).unwrap();

    let outcome = prober.probe(&endpoint(format!("{}/slow", base), "GET", "")).await;
    assert!(outcome.status_code.is_none());
    assert!(matches!(outcome.error, Some(ProbeError::Timeout { .. })));
    assert!(outcome.latency >= Duration::from_millis(100));
    assert!(outcome.latency < Duration::from_millis(500));
}

#[tokio::test]
async fn test_latency_is_measured() {
    let (base, _) = spawn_server().await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();

    let outcome = prober.probe(&endpoint(format!("{}/slow", base), "GET", "")).await;
    assert_eq!(outcome.status_code, Some(200));
    assert!(outcome.latency >= Duration::from_millis(500));
}
