//! DevOps API: a small HTTP service with request metrics, structured access
//! logs and per-request trace spans.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::MetricsRegistry;
