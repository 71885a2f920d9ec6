//! HTTP module
//!
//! Value objects, the transport adapter seam and the request builder that
//! drives it.

use crate::error::ProbeError;
use std::fmt;
use std::str::FromStr;

pub mod adapter;
pub mod auth;
pub mod client;
pub mod cookie;
pub mod header;
mod jar;
pub mod recording;
pub mod request;
pub mod response;

pub use adapter::HttpAdapter;
pub use auth::Auth;
pub use client::ReqwestAdapter;
pub use cookie::{Cookie, CookieBuilder};
pub use header::Header;
pub use recording::{RecordedCall, RecordingAdapter};
pub use request::RequestBuilder;
pub use response::{Response, ResponseBuilder};

/// HTTP verbs the builder can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// GET and DELETE are sent without a body.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", method)
    }
}

impl FromStr for HttpMethod {
    type Err = ProbeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ProbeError::InvalidArgument(format!(
                "Unknown http method: {}",
                s
            ))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HttpMethod;
    use crate::error::ProbeError;

    #[test]
    fn parses_supported_verbs_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().expect("GET"), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().expect("POST"), HttpMethod::Post);
        assert_eq!(" PUT ".parse::<HttpMethod>().expect("PUT"), HttpMethod::Put);
        assert_eq!("delete".parse::<HttpMethod>().expect("DELETE"), HttpMethod::Delete);
    }

    #[test]
    fn rejects_other_verbs() {
        for verb in ["PATCH", "HEAD", "OPTIONS", ""] {
            let err = verb.parse::<HttpMethod>().expect_err("unsupported verb");
            assert!(matches!(err, ProbeError::InvalidArgument(_)));
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
        ] {
            assert_eq!(method.to_string().parse::<HttpMethod>().expect("verb"), method);
        }
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
    }
}
