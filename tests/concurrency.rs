//! Parallel load must not lose counter updates.

use futures_util::future::join_all;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_health_requests() {
    let server = common::start_default_server().await;
    let client = common::client();

    let requests = (0..100).map(|_| {
        let client = client.clone();
        let url = server.url("/health");
        async move { client.get(url).send().await.map(|r| r.status()) }
    });

    let statuses = join_all(requests).await;
    assert!(statuses.iter().all(|s| matches!(s, Ok(s) if s.as_u16() == 200)));

    let text = common::scrape(&client, &server).await;
    assert_eq!(common::request_count(&text, "GET", "/health"), 100);
    assert_eq!(common::latency_count(&text, "/health"), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_tasks_mixed_routes() {
    let server = common::start_default_server().await;
    let client = common::client();

    let concurrency = 10;
    let requests_per_task = 20;

    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        let path = if i % 2 == 0 { "/health" } else { "/hello" };
        let url = server.url(path);
        tasks.push(tokio::spawn(async move {
            for _ in 0..requests_per_task {
                let res = client.get(&url).send().await.unwrap();
                assert_eq!(res.status(), 200);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let text = common::scrape(&client, &server).await;
    let per_route = (concurrency / 2 * requests_per_task) as u64;
    assert_eq!(common::request_count(&text, "GET", "/health"), per_route);
    assert_eq!(common::request_count(&text, "GET", "/hello"), per_route);
}
