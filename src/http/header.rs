//! Header value object

use crate::error::{ProbeError, Result};
use crate::utils::StringUtils;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::str::FromStr;

/// A single HTTP header as a name/value pair.
///
/// Sequences of headers keep their order and may repeat a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Case-insensitive name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub(crate) fn to_native(&self) -> Result<(HeaderName, HeaderValue)> {
        let name = HeaderName::from_bytes(self.name.as_bytes()).map_err(|e| {
            ProbeError::InvalidArgument(format!("Invalid header name '{}': {}", self.name, e))
        })?;
        let value = HeaderValue::from_str(&self.value).map_err(|e| {
            ProbeError::InvalidArgument(format!(
                "Invalid value for header '{}': {}",
                self.name, e
            ))
        })?;
        Ok((name, value))
    }

    pub(crate) fn from_native(name: &HeaderName, value: &HeaderValue) -> Self {
        Self {
            name: name.as_str().to_string(),
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        }
    }

    /// Convert every entry of a native header map, keeping repeated names.
    pub(crate) fn from_native_map(headers: &HeaderMap) -> Vec<Self> {
        headers
            .iter()
            .map(|(name, value)| Self::from_native(name, value))
            .collect()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl FromStr for Header {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = StringUtils::parse_header(s)?;
        Ok(Header::new(name, value))
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Header {
    fn from((name, value): (N, V)) -> Self {
        Header::new(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::Header;
    use crate::error::ProbeError;
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Header::new("Accept", "text/plain"), Header::from(("Accept", "text/plain")));
        assert_ne!(Header::new("Accept", "text/plain"), Header::new("accept", "text/plain"));
    }

    #[test]
    fn parses_and_displays_header_lines() {
        let header: Header = "X-Trace:  abc ".parse().expect("header");
        assert_eq!(header.name(), "X-Trace");
        assert_eq!(header.value(), "abc");
        assert_eq!(header.to_string(), "X-Trace: abc");
        assert!(header.is("x-trace"));
    }

    #[test]
    fn native_conversion_rejects_invalid_names() {
        let err = Header::new("Bad Name", "v").to_native().expect_err("invalid name");
        assert!(matches!(err, ProbeError::InvalidArgument(_)));

        let err = Header::new("X-Ok", "line\nbreak")
            .to_native()
            .expect_err("invalid value");
        assert!(matches!(err, ProbeError::InvalidArgument(_)));
    }

    #[test]
    fn native_map_keeps_repeated_names() {
        let mut map = HeaderMap::new();
        map.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        map.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let headers = Header::from_native_map(&map);
        assert_eq!(
            headers,
            vec![Header::new("set-cookie", "a=1"), Header::new("set-cookie", "b=2")]
        );
    }
}
