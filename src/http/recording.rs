//! In-memory adapter that records calls and replays canned responses.

use super::adapter::HttpAdapter;
use super::cookie::Cookie;
use super::header::Header;
use super::jar::CookieJar;
use super::response::Response;
use super::HttpMethod;
use crate::error::Result;
use std::collections::VecDeque;
use url::Url;

/// One call observed by a [`RecordingAdapter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub uri: String,
    pub headers: Vec<Header>,
    pub content_type: Option<String>,
    pub body: Option<String>,
    /// `Cookie` header the jar would have sent
    pub cookie_header: Option<String>,
}

/// Adapter that never touches the network.
///
/// Queued responses are replayed in order; once the queue is empty every
/// call answers `200` with an empty body. The jar behaves like the real
/// adapter's, minus `Set-Cookie` processing.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    calls: Vec<RecordedCall>,
    responses: VecDeque<Response>,
    jar: CookieJar,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&mut self, response: Response) -> &mut Self {
        self.responses.push_back(response);
        self
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn last_call(&self) -> Option<&RecordedCall> {
        self.calls.last()
    }

    pub fn cookies(&self) -> Result<Vec<Cookie>> {
        self.jar.snapshot()
    }

    fn record(
        &mut self,
        method: HttpMethod,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.jar.clear_expired();
        self.calls.push(RecordedCall {
            method,
            uri: uri.to_string(),
            headers: headers.to_vec(),
            content_type: content_type.map(str::to_string),
            body: body.map(str::to_string),
            cookie_header: self.jar.header_for(uri),
        });

        let cookies = self.jar.snapshot()?;
        let response = match self.responses.pop_front() {
            Some(response) => response,
            None => Response::builder().status_code(200).build(),
        };

        Ok(Response::builder()
            .status_code(response.status_code())
            .body(response.body())
            .headers(response.headers().to_vec())
            .content_type(response.content_type().cloned())
            .cookies(cookies)
            .build())
    }
}

impl HttpAdapter for RecordingAdapter {
    fn get(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        self.record(HttpMethod::Get, uri, headers, None, None)
    }

    fn post(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.record(HttpMethod::Post, uri, headers, content_type, body)
    }

    fn put(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.record(HttpMethod::Put, uri, headers, content_type, body)
    }

    fn delete(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        self.record(HttpMethod::Delete, uri, headers, None, None)
    }

    fn add_cookies(&mut self, cookies: &[Cookie]) -> Result<()> {
        self.jar.add_all(cookies)
    }

    fn clear_cookies(&mut self) {
        self.jar.clear();
    }
}
