//! Adapter-owned cookie jar
//!
//! Cookies are held in the `cookie` crate's native representation and
//! converted to and from [`Cookie`] at the adapter boundary.

use super::cookie::{normalize_domain, Cookie};
use crate::error::{ProbeError, Result};
use chrono::{DateTime, Utc};
use ::cookie::time::OffsetDateTime;
use ::cookie::Cookie as NativeCookie;
use reqwest::header::{HeaderMap, SET_COOKIE};
use std::net::IpAddr;
use url::Url;

/// A native cookie plus the version attribute the native type does not model.
#[derive(Debug, Clone)]
pub(crate) struct StoredCookie {
    native: NativeCookie<'static>,
    version: i32,
}

impl StoredCookie {
    pub(crate) fn from_cookie(cookie: &Cookie) -> Result<Self> {
        let mut native = NativeCookie::new(cookie.name().to_string(), cookie.value().to_string());
        native.set_domain(cookie.domain().to_string());
        if let Some(path) = cookie.path() {
            native.set_path(path.to_string());
        }
        if let Some(expiry) = cookie.expiry_date() {
            native.set_expires(to_offset_date_time(expiry)?);
        }

        Ok(Self {
            native,
            version: cookie.version(),
        })
    }

    pub(crate) fn to_cookie(&self) -> Result<Cookie> {
        let mut builder = Cookie::builder()
            .name(self.native.name())
            .value(self.native.value())
            .version(self.version);

        if let Some(domain) = self.native.domain() {
            builder = builder.domain(domain);
        }
        if let Some(path) = self.native.path() {
            builder = builder.path(path);
        }
        if let Some(expiry) = self.native.expires_datetime() {
            builder = builder.expiry_date(to_chrono(expiry)?);
        }

        builder.build()
    }

    fn identity(&self) -> (String, String, &str) {
        (
            normalize_domain(self.native.domain().unwrap_or_default()),
            self.native.path().unwrap_or("/").to_string(),
            self.native.name(),
        )
    }

    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.native
            .expires_datetime()
            .is_some_and(|expiry| expiry <= now)
    }

    fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        if self.native.secure() == Some(true) && url.scheme() != "https" {
            return false;
        }
        let domain = self.native.domain().unwrap_or_default();
        let path = self.native.path().unwrap_or("/");
        domain_matches(host, domain) && path_matches(url.path(), path)
    }
}

fn to_offset_date_time(expiry: DateTime<Utc>) -> Result<OffsetDateTime> {
    let nanos = i128::from(expiry.timestamp_millis()) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
        ProbeError::InvalidArgument(format!("Cookie expiry {} out of range: {}", expiry, e))
    })
}

fn to_chrono(expiry: OffsetDateTime) -> Result<DateTime<Utc>> {
    let millis = expiry.unix_timestamp_nanos().div_euclid(1_000_000);
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| {
            ProbeError::InvalidArgument(format!("Cookie expiry {} out of range", expiry))
        })
}

/// RFC 6265 domain matching; IP hosts only match exactly.
pub(crate) fn domain_matches(host: &str, domain: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let domain = normalize_domain(domain);
    if host == domain {
        return true;
    }
    let host_is_ip = host
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok();
    !host_is_ip && host.ends_with(&format!(".{}", domain))
}

/// RFC 6265 path matching
pub(crate) fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/'))
}

/// RFC 6265 default-path: the request path up to its last `/`
pub(crate) fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(index) => request_path[..index].to_string(),
    }
}

/// Cookies retained across calls, keyed by (domain, path, name).
#[derive(Debug, Clone, Default)]
pub(crate) struct CookieJar {
    entries: Vec<StoredCookie>,
}

impl CookieJar {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a cookie; an already expired cookie evicts its match instead.
    pub(crate) fn add(&mut self, cookie: StoredCookie) {
        let now = OffsetDateTime::now_utc();
        let position = self
            .entries
            .iter()
            .position(|existing| existing.identity() == cookie.identity());

        match (position, cookie.is_expired(now)) {
            (Some(index), true) => {
                self.entries.remove(index);
            }
            (Some(index), false) => self.entries[index] = cookie,
            (None, true) => {}
            (None, false) => self.entries.push(cookie),
        }
    }

    pub(crate) fn add_all(&mut self, cookies: &[Cookie]) -> Result<()> {
        for cookie in cookies {
            self.add(StoredCookie::from_cookie(cookie)?);
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn clear_expired(&mut self) {
        let now = OffsetDateTime::now_utc();
        self.entries.retain(|entry| !entry.is_expired(now));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Cookie` request header value for `url`, if any cookie applies
    pub(crate) fn header_for(&self, url: &Url) -> Option<String> {
        let now = OffsetDateTime::now_utc();
        let pairs: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_expired(now) && entry.matches(url))
            .map(|entry| format!("{}={}", entry.native.name(), entry.native.value()))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Merge every `Set-Cookie` header of a response to `url`.
    pub(crate) fn store_response_cookies(&mut self, url: &Url, headers: &HeaderMap) {
        let Some(host) = url.host_str() else {
            return;
        };

        for value in headers.get_all(SET_COOKIE) {
            let raw = match value.to_str() {
                Ok(raw) => raw,
                Err(_) => {
                    log::warn!("Ignoring non-UTF-8 Set-Cookie header from {}", url);
                    continue;
                }
            };

            let mut native = match NativeCookie::parse(raw.to_string()) {
                Ok(native) => native,
                Err(e) => {
                    log::warn!("Ignoring malformed Set-Cookie '{}' from {}: {}", raw, url, e);
                    continue;
                }
            };

            match native.domain().map(str::to_string) {
                Some(domain) if !domain_matches(host, &domain) => {
                    log::warn!(
                        "Rejecting cookie '{}' for domain '{}' set by host '{}'",
                        native.name(),
                        domain,
                        host
                    );
                    continue;
                }
                Some(_) => {}
                None => native.set_domain(host.to_string()),
            }

            if native.path().is_none() {
                native.set_path(default_path(url.path()));
            }

            if let Some(max_age) = native.max_age() {
                native.set_expires(OffsetDateTime::now_utc() + max_age);
            }

            self.add(StoredCookie { native, version: 0 });
        }
    }

    /// The jar's contents as adapter cookies, in insertion order
    pub(crate) fn snapshot(&self) -> Result<Vec<Cookie>> {
        self.entries.iter().map(StoredCookie::to_cookie).collect()
    }
}
