//! Transport adapter interface

use super::cookie::Cookie;
use super::header::Header;
use super::response::Response;
use crate::error::Result;
use url::Url;

/// A swappable transport that executes one synchronous HTTP call per verb
/// method and keeps a cookie jar across calls.
///
/// Bodies are only accepted by the verbs that carry one.
pub trait HttpAdapter {
    fn get(&mut self, uri: &Url, headers: &[Header]) -> Result<Response>;

    fn post(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response>;

    fn put(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response>;

    fn delete(&mut self, uri: &Url, headers: &[Header]) -> Result<Response>;

    /// Merge cookies into the jar; they are offered on every later call.
    fn add_cookies(&mut self, cookies: &[Cookie]) -> Result<()>;

    fn clear_cookies(&mut self);
}

impl<A: HttpAdapter + ?Sized> HttpAdapter for Box<A> {
    fn get(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        (**self).get(uri, headers)
    }

    fn post(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        (**self).post(uri, headers, content_type, body)
    }

    fn put(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        (**self).put(uri, headers, content_type, body)
    }

    fn delete(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        (**self).delete(uri, headers)
    }

    fn add_cookies(&mut self, cookies: &[Cookie]) -> Result<()> {
        (**self).add_cookies(cookies)
    }

    fn clear_cookies(&mut self) {
        (**self).clear_cookies()
    }
}
