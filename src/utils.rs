//! Utility functions and helpers

use crate::error::{ProbeError, Result};
use std::time::Duration;

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse `Name: value` header lines
    pub fn parse_header(input: &str) -> Result<(String, String)> {
        let parts: Vec<&str> = input.splitn(2, ':').collect();
        match parts.as_slice() {
            [key, value] if !key.trim().is_empty() => {
                let key = key.trim().to_string();
                let value = value.trim().to_string();
                Ok((key, value))
            }
            _ => Err(ProbeError::InvalidArgument(format!(
                "Invalid header format: '{}'. Expected 'key: value'",
                input
            ))),
        }
    }

    /// Parse timeout values (supports suffixes like 's', 'm', 'h')
    pub fn parse_timeout(input: &str) -> Result<Duration> {
        let input = input.trim();
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(Duration::from_secs(seconds));
        }

        let (number_part, suffix) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else {
            return Err(ProbeError::Config(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (s/m/h)",
                input
            )));
        };

        let number: u64 = number_part
            .parse()
            .map_err(|_| ProbeError::Config(format!("Invalid timeout number: '{}'", number_part)))?;

        let seconds = number
            .checked_mul(suffix)
            .ok_or_else(|| ProbeError::Config(format!("Timeout out of range: '{}'", input)))?;
        Ok(Duration::from_secs(seconds))
    }

    /// Parse boolean switches such as `1`, `true`, `yes`, `off`
    pub fn parse_flag(input: &str) -> Result<bool> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ProbeError::Config(format!("Invalid flag value: '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StringUtils;
    use crate::error::ProbeError;
    use std::time::Duration;

    #[test]
    fn parse_header_splits_key_value() {
        let (key, value) = StringUtils::parse_header("X-Test: value").expect("header");
        assert_eq!(key, "X-Test");
        assert_eq!(value, "value");

        let err = StringUtils::parse_header("missing").expect_err("invalid header");
        assert!(matches!(err, ProbeError::InvalidArgument(_)));

        let err = StringUtils::parse_header(": value").expect_err("empty name");
        assert!(matches!(err, ProbeError::InvalidArgument(_)));
    }

    #[test]
    fn parse_header_keeps_colons_in_value() {
        let (key, value) = StringUtils::parse_header("Referer: http://a.test:8080/").expect("header");
        assert_eq!(key, "Referer");
        assert_eq!(value, "http://a.test:8080/");
    }

    #[test]
    fn parse_timeout_parses_suffixes() {
        assert_eq!(
            StringUtils::parse_timeout("10").expect("seconds"),
            Duration::from_secs(10)
        );
        assert_eq!(
            StringUtils::parse_timeout("2m").expect("minutes"),
            Duration::from_secs(120)
        );
        assert_eq!(
            StringUtils::parse_timeout("1h").expect("hours"),
            Duration::from_secs(3600)
        );

        let err = StringUtils::parse_timeout("5x").expect_err("invalid suffix");
        assert!(matches!(err, ProbeError::Config(_)));

        let err = StringUtils::parse_timeout("xs").expect_err("invalid number");
        assert!(matches!(err, ProbeError::Config(_)));
    }

    #[test]
    fn parse_timeout_rejects_overflow() {
        let err = StringUtils::parse_timeout("9999999999999999h").expect_err("overflow");
        assert!(matches!(err, ProbeError::Config(_)));

        assert_eq!(
            StringUtils::parse_timeout(&format!("{}s", u64::MAX)).expect("max seconds"),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(StringUtils::parse_flag("TRUE").expect("flag"));
        assert!(StringUtils::parse_flag("1").expect("flag"));
        assert!(!StringUtils::parse_flag("off").expect("flag"));

        let err = StringUtils::parse_flag("maybe").expect_err("invalid flag");
        assert!(matches!(err, ProbeError::Config(_)));
    }
}
