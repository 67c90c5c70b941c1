//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

use log_crawler::config::{CrawlerConfig, RunConfig, ServiceSpec};

/// A request as seen by the mock downstream service.
#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Canned response for one path.
#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Hold the response back for `delay` before answering.
    #[allow(dead_code)]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 200 response carrying both proxy timing headers.
    pub fn timed(service: &str, id: &str, operation: &str) -> Self {
        Self::ok(r#"{"result":"ok"}"#)
            .header(
                "X-Performance-Tuning-StartLog",
                &format!("{service}|{id}|{operation} - start|2024-01-01|10:00:00.000"),
            )
            .header(
                "X-Performance-Tuning-EndLog",
                &format!("{service}|{id}|{operation} - end|2024-01-01|10:00:00.180"),
            )
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, MockResponse>>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Mock downstream service that records every request it receives.
#[derive(Clone)]
pub struct MockDownstream {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockDownstream {
    /// Start on a random local port. Unknown paths answer 404.
    pub async fn start(routes: Vec<(&str, MockResponse)>) -> Self {
        let state = MockState {
            routes: Arc::new(routes.into_iter().map(|(p, r)| (p.to_string(), r)).collect()),
            received: Arc::new(Mutex::new(Vec::new())),
        };
        let received = state.received.clone();

        let app = Router::new().fallback(handle).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, received }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ReceivedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let headers = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    state.received.lock().unwrap().push(ReceivedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let Some(canned) = state.routes.get(uri.path()) else {
        return (StatusCode::NOT_FOUND, "no route").into_response();
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response_headers = HeaderMap::new();
    for (name, value) in &canned.headers {
        response_headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    let status = StatusCode::from_u16(canned.status).unwrap();
    (status, response_headers, canned.body.clone()).into_response()
}

/// Local address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Local address that accepts connections but never answers.
#[allow(dead_code)]
pub async fn hung_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Config with no pacing and no environment proxy.
#[allow(dead_code)]
pub fn config(url_prefix: &str, services: Vec<ServiceSpec>) -> CrawlerConfig {
    CrawlerConfig {
        url_prefix: url_prefix.to_string(),
        token: "t".to_string(),
        services,
        run: RunConfig {
            pacing_delay_ms: 0,
            use_system_proxy: false,
            ..RunConfig::default()
        },
    }
}
