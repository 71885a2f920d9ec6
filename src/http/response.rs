//! Response value object

use super::cookie::Cookie;
use super::header::Header;
use crate::error::{ProbeError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Immutable snapshot of one completed HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    body: String,
    headers: Vec<Header>,
    content_type: Option<Header>,
    cookies: Vec<Cookie>,
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// First header called `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|header| header.is(name))
    }

    pub fn content_type(&self) -> Option<&Header> {
        self.content_type.as_ref()
    }

    /// The adapter's cookie jar as it stood after the call
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Parse the body as a JSON object
    pub fn body_as_json(&self) -> Result<Map<String, Value>> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Parse the body as a JSON array
    pub fn body_as_json_array(&self) -> Result<Vec<Value>> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Deserialize the body into any JSON-backed type
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Fail with [`ProbeError::StatusMismatch`] unless the status code is `expected`.
    ///
    /// Returns the response on success so assertions can chain off `build()`.
    pub fn validate_status_code(self, expected: u16) -> Result<Self> {
        if self.status_code != expected {
            return Err(ProbeError::StatusMismatch {
                expected,
                actual: self.status_code,
                response: self.to_string(),
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Response:")?;
        writeln!(f, "statusCode:\n\t{}", self.status_code)?;

        writeln!(f, "cookies:")?;
        for cookie in &self.cookies {
            writeln!(f, "\t{}", cookie)?;
        }

        writeln!(f, "headers:")?;
        for header in &self.headers {
            writeln!(f, "\t{}", header)?;
        }

        match &self.content_type {
            Some(content_type) => writeln!(f, "contentType:\n\t{}", content_type)?,
            None => writeln!(f, "contentType:\n\t<none>")?,
        }

        if !self.body.is_empty() {
            write!(f, "body\n{}", self.body)?;
        }
        Ok(())
    }
}

/// Assembles a [`Response`]; used by adapters and by fakes in tests.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    status_code: u16,
    body: String,
    headers: Vec<Header>,
    content_type: Option<Header>,
    cookies: Vec<Cookie>,
}

impl ResponseBuilder {
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn headers(mut self, headers: Vec<Header>) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn content_type(mut self, content_type: Option<Header>) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status_code: self.status_code,
            body: self.body,
            headers: self.headers,
            content_type: self.content_type,
            cookies: self.cookies,
        }
    }
}
