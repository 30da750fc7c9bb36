//! Middleware applied to every route.

pub mod observe;

pub use observe::observe_requests;
