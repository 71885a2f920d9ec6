//! Cookie value object

use crate::error::{ProbeError, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// An immutable cookie as seen by test code.
///
/// Only the domain is mandatory. Build one with [`Cookie::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cookie {
    name: String,
    value: String,
    domain: String,
    path: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
    version: i32,
}

impl Cookie {
    pub fn builder() -> CookieBuilder {
        CookieBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

pub(crate) fn normalize_domain(domain: &str) -> String {
    domain.trim_start_matches('.').to_ascii_lowercase()
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cookie{{version={}, name='{}', value='{}', domain='{}', path={:?}, expiry_date={:?}}}",
            self.version,
            self.name,
            self.value,
            self.domain,
            self.path,
            self.expiry_date.map(|d| d.to_rfc3339())
        )
    }
}

/// Validating builder for [`Cookie`]
#[derive(Debug, Clone, Default)]
pub struct CookieBuilder {
    name: String,
    value: String,
    domain: Option<String>,
    path: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
    version: i32,
}

impl CookieBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// A leading dot carries no meaning for cookie matching and is dropped.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        let domain: String = domain.into();
        self.domain = Some(domain.trim_start_matches('.').to_string());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Expiry is kept at millisecond precision.
    pub fn expiry_date(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry_date = DateTime::from_timestamp_millis(expiry.timestamp_millis());
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn build(self) -> Result<Cookie> {
        let domain = self.domain.ok_or_else(|| {
            ProbeError::InvalidArgument("The cookie domain can not be missing".to_string())
        })?;

        Ok(Cookie {
            name: self.name,
            value: self.value,
            domain,
            path: self.path,
            expiry_date: self.expiry_date,
            version: self.version,
        })
    }
}
