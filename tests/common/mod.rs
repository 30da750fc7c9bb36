//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use devops_api::config::ServiceConfig;
use devops_api::http::HttpServer;
use devops_api::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with the given config on 127.0.0.1:0.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // The listener is already bound, so connections queue until serve starts.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown }
}

pub async fn start_default_server() -> TestServer {
    start_server(ServiceConfig::default()).await
}

/// Client without connection pooling or proxy detection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Value of the first exposition sample named `name` that carries every label.
#[allow(dead_code)]
pub fn sample(text: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .filter(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
        })
        .find(|line| {
            labels
                .iter()
                .all(|(k, v)| line.contains(&format!("{}=\"{}\"", k, v)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

/// Current `request_count` for `(method, endpoint)`, zero when absent.
#[allow(dead_code)]
pub fn request_count(text: &str, method: &str, endpoint: &str) -> u64 {
    let labels = [("method", method), ("endpoint", endpoint)];
    sample(text, "request_count", &labels)
        .or_else(|| sample(text, "request_count_total", &labels))
        .map(|v| v as u64)
        .unwrap_or(0)
}

/// Current latency observation count for `endpoint`, zero when absent.
#[allow(dead_code)]
pub fn latency_count(text: &str, endpoint: &str) -> u64 {
    sample(text, "request_latency_seconds_count", &[("endpoint", endpoint)])
        .map(|v| v as u64)
        .unwrap_or(0)
}

/// Fetch the exposition text.
#[allow(dead_code)]
pub async fn scrape(client: &reqwest::Client, server: &TestServer) -> String {
    let res = client.get(server.url("/metrics")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    res.text().await.unwrap()
}
