//! Fluent request builder
//!
//! A [`RequestBuilder`] is bound to one base domain and one adapter. Each
//! `build()` turns the accumulated state into a single call:
//!
//! - the URI is `domain + path`, followed by `?name=value&name=value` for
//!   the parameters in insertion order. Nothing is percent-encoded here, so
//!   values must already be encoded by the caller.
//! - pending cookies are handed to the adapter's jar before dispatch.
//! - after a successful call, headers, parameters and path are reset.
//!   Method, body, content type and cookies carry over to the next call.

use super::adapter::HttpAdapter;
use super::client::ReqwestAdapter;
use super::cookie::Cookie;
use super::header::Header;
use super::response::Response;
use super::HttpMethod;
use crate::error::{ProbeError, Result};
use serde::Serialize;
use url::Url;


/// Fluent builder that dispatches requests through an [`HttpAdapter`].
pub struct RequestBuilder<A: HttpAdapter = ReqwestAdapter> {
    domain: String,
    adapter: A,
    path: Option<String>,
    method: Option<HttpMethod>,
    body: Option<String>,
    content_type: Option<String>,
    headers: Vec<Header>,
    parameters: Vec<(String, String)>,
    cookies: Vec<Cookie>,
}

impl RequestBuilder<ReqwestAdapter> {
    /// Builder backed by a [`ReqwestAdapter`] with default configuration
    pub fn with_default_adapter(domain: impl Into<String>) -> Result<Self> {
        Ok(Self::new(domain, ReqwestAdapter::with_defaults()?))
    }
}

impl<A: HttpAdapter> RequestBuilder<A> {
    pub fn new(domain: impl Into<String>, adapter: A) -> Self {
        Self {
            domain: domain.into(),
            adapter,
            path: None,
            method: None,
            body: None,
            content_type: None,
            headers: Vec::new(),
            parameters: Vec::new(),
            cookies: Vec::new(),
        }
    }

    pub fn set_method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = Some(method);
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` to a JSON string and use it as the body
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<&mut Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn clear_body(&mut self) -> &mut Self {
        self.body = None;
        self
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Append a query parameter; the value is used verbatim.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn add_header_value(&mut self, header: Header) -> &mut Self {
        self.headers.push(header);
        self
    }

    pub fn add_cookie(&mut self, cookie: Cookie) -> &mut Self {
        self.cookies.push(cookie);
        self
    }

    /// Drop pending cookies and empty the adapter's jar
    pub fn clear_cookies(&mut self) -> &mut Self {
        self.cookies.clear();
        self.adapter.clear_cookies();
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// The URI the next `build()` would call, exactly as assembled.
    pub fn uri(&self) -> String {
        let mut uri = String::with_capacity(self.domain.len() + 32);
        uri.push_str(&self.domain);
        if let Some(path) = &self.path {
            uri.push_str(path);
        }

        for (index, (name, value)) in self.parameters.iter().enumerate() {
            uri.push(if index == 0 { '?' } else { '&' });
            uri.push_str(name);
            uri.push('=');
            uri.push_str(value);
        }
        uri
    }

    /// Execute the configured request and return its response.
    pub fn build(&mut self) -> Result<Response> {
        let raw_uri = self.uri();
        let uri = Url::parse(&raw_uri)
            .map_err(|e| ProbeError::InvalidUrl(format!("Invalid URL '{}': {}", raw_uri, e)))?;

        self.adapter.add_cookies(&self.cookies)?;

        let method = self
            .method
            .ok_or_else(|| ProbeError::InvalidState("Http method can not be unset".to_string()))?;

        if !method.allows_body() && self.body.is_some() {
            log::warn!("Setting a body for DELETE or GET methods has no impact");
        }

        let content_type = self.content_type.as_deref();
        let body = self.body.as_deref();
        let response = match method {
            HttpMethod::Get => self.adapter.get(&uri, &self.headers)?,
            HttpMethod::Post => self.adapter.post(&uri, &self.headers, content_type, body)?,
            HttpMethod::Put => self.adapter.put(&uri, &self.headers, content_type, body)?,
            HttpMethod::Delete => self.adapter.delete(&uri, &self.headers)?,
        };

        self.headers.clear();
        self.parameters.clear();
        self.path = None;

        Ok(response)
    }
}
