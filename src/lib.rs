//! apiprobe - HTTP request builder for REST API test suites
//!
//! A [`RequestBuilder`] accumulates method, path, query parameters, headers,
//! body and cookies, then dispatches one synchronous call through a
//! swappable [`HttpAdapter`]. The default adapter is backed by `reqwest`
//! and keeps its own cookie jar across calls. Responses come back as
//! immutable [`Response`] snapshots with JSON views and a status assertion.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod ssl;
pub mod utils;

pub use config::AdapterConfig;
pub use error::{ProbeError, Result};
pub use http::{
    Cookie, Header, HttpAdapter, HttpMethod, RecordingAdapter, ReqwestAdapter, RequestBuilder,
    Response,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
