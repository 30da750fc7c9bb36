//! End-to-end checks of the HTTP surface over a real socket.

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_health() {
    let server = common::start_default_server().await;
    let client = common::client();

    let res = client.get(server.url("/health")).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_hello() {
    let server = common::start_default_server().await;
    let client = common::client();

    let res = client.get(server.url("/hello?name=Ines")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"message": "Hello, Ines!"}));
}

#[tokio::test]
async fn test_hello_defaults_to_world() {
    let server = common::start_default_server().await;
    let client = common::client();

    let res = client.get(server.url("/hello")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), r#"{"message":"Hello, World!"}"#);
}

#[tokio::test]
async fn test_root() {
    let server = common::start_default_server().await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"message": "DevOps API", "version": "1.0"})
    );
}

#[tokio::test]
async fn test_health_unaffected_by_history() {
    let server = common::start_default_server().await;
    let client = common::client();

    for path in ["/", "/hello?name=x", "/missing", "/metrics", "/hello"] {
        client.get(server.url(path)).send().await.unwrap();
    }

    for _ in 0..3 {
        let res = client.get(server.url("/health")).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), r#"{"status":"ok"}"#);
    }
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = common::start_default_server().await;
    let client = common::client();

    let res = client
        .get(server.url("/health"))
        .header("x-request-id", "req-42")
        .header("traceparent", "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-42");

    let res = client.get(server.url("/health")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}
