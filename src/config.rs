//! Configuration management for the transport adapter

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ProbeError, Result};
use crate::utils::StringUtils;

/// Proxy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// SSL/TLS configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslConfig {
    pub verify_certs: bool,
    pub ca_cert_file: Option<PathBuf>,
}

/// Settings used to build the HTTP client behind
/// [`ReqwestAdapter`](crate::http::ReqwestAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    pub proxy: Option<ProxyConfig>,
    pub ssl: SslConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            user_agent: Some(format!("apiprobe/{}", crate::VERSION)),
            follow_redirects: true,
            max_redirects: 10,
            proxy: None,
            ssl: SslConfig {
                verify_certs: true,
                ca_cert_file: None,
            },
        }
    }
}

impl AdapterConfig {
    /// Default configuration overlaid with `APIPROBE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default configuration overlaid with values returned by `lookup`.
    ///
    /// Recognized keys: `APIPROBE_TIMEOUT`, `APIPROBE_CONNECT_TIMEOUT`,
    /// `APIPROBE_USER_AGENT`, `APIPROBE_FOLLOW_REDIRECTS`,
    /// `APIPROBE_MAX_REDIRECTS`, `APIPROBE_PROXY`, `APIPROBE_INSECURE`
    /// and `APIPROBE_CA_CERT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AdapterConfig::default();

        if let Some(timeout) = lookup("APIPROBE_TIMEOUT") {
            config.timeout = StringUtils::parse_timeout(&timeout)?;
        }

        if let Some(timeout) = lookup("APIPROBE_CONNECT_TIMEOUT") {
            config.connect_timeout = StringUtils::parse_timeout(&timeout)?;
        }

        if let Some(user_agent) = lookup("APIPROBE_USER_AGENT") {
            config.user_agent = if user_agent.is_empty() {
                None
            } else {
                Some(user_agent)
            };
        }

        if let Some(follow) = lookup("APIPROBE_FOLLOW_REDIRECTS") {
            config.follow_redirects = StringUtils::parse_flag(&follow)?;
        }

        if let Some(max) = lookup("APIPROBE_MAX_REDIRECTS") {
            config.max_redirects = max.trim().parse().map_err(|_| {
                ProbeError::Config(format!("Invalid redirect limit: '{}'", max))
            })?;
        }

        if let Some(proxy) = lookup("APIPROBE_PROXY") {
            config.proxy = Some(ProxyConfig::parse(&proxy)?);
        }

        if let Some(insecure) = lookup("APIPROBE_INSECURE") {
            config.ssl.verify_certs = !StringUtils::parse_flag(&insecure)?;
        }

        if let Some(ca_cert) = lookup("APIPROBE_CA_CERT") {
            config.ssl.ca_cert_file = Some(PathBuf::from(ca_cert));
        }

        Ok(config)
    }
}

impl ProxyConfig {
    /// Parse `[user[:password]@]scheme://host[:port]`-style proxy settings.
    ///
    /// Credentials are split off the URL so they can be handed to the
    /// client's basic-auth hook instead of being left in the proxy URL.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ProbeError::Config("Proxy URL is empty".to_string()));
        }

        let url = url::Url::parse(input)
            .map_err(|e| ProbeError::Config(format!("Invalid proxy '{}': {}", input, e)))?;

        let username = match url.username() {
            "" => None,
            name => Some(decode_credential(name)?),
        };
        let password = url.password().map(decode_credential).transpose()?;

        let mut bare = url.clone();
        // Only fails for cannot-be-a-base URLs, which already carry no credentials.
        let _ = bare.set_username("");
        let _ = bare.set_password(None);

        Ok(ProxyConfig {
            url: bare.to_string(),
            username,
            password,
        })
    }
}

fn decode_credential(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ProbeError::Config(format!("Invalid proxy credentials: {}", e)))
}
