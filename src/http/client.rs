//! `reqwest`-backed transport adapter

use super::adapter::HttpAdapter;
use super::cookie::Cookie;
use super::header::Header;
use super::jar::CookieJar;
use super::response::Response;
use super::HttpMethod;
use crate::config::AdapterConfig;
use crate::error::{ProbeError, Result};
use crate::ssl::SslUtils;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, PROXY_AUTHORIZATION, WWW_AUTHENTICATE,
};
use reqwest::StatusCode;
use url::Url;

/// Blocking HTTP adapter with its own cookie jar.
///
/// One client is built per adapter and reused for every call. The jar lives
/// as long as the adapter, so independent adapters never share cookies.
///
/// Redirects are followed here rather than inside reqwest so every hop's
/// `Set-Cookie` lands in the jar and the next hop gets a fresh `Cookie`
/// header.
pub struct ReqwestAdapter {
    client: Client,
    jar: CookieJar,
    follow_redirects: bool,
    max_redirects: u32,
}

/// Request state carried from one redirect hop to the next
struct Hop<'a> {
    method: HttpMethod,
    url: Url,
    headers: Vec<Header>,
    content_type: Option<&'a str>,
    body: Option<&'a str>,
}

impl ReqwestAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::none());

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        // Configure proxy if specified
        if let Some(proxy_config) = &config.proxy {
            let proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| ProbeError::Config(format!("Invalid proxy: {}", e)))?;

            let proxy = match &proxy_config.username {
                Some(username) => {
                    proxy.basic_auth(username, proxy_config.password.as_deref().unwrap_or_default())
                }
                None => proxy,
            };

            builder = builder.proxy(proxy);
        }

        // Configure SSL/TLS
        SslUtils::validate_config(&config.ssl)?;
        if let Some(ca_cert) = &config.ssl.ca_cert_file {
            builder = builder.add_root_certificate(SslUtils::load_ca_certificate(ca_cert)?);
        }
        if !config.ssl.verify_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(ProbeError::Transport)?;

        Ok(Self {
            client,
            jar: CookieJar::new(),
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
        })
    }

    /// Adapter built from [`AdapterConfig::default`]
    pub fn with_defaults() -> Result<Self> {
        Self::new(AdapterConfig::default())
    }

    /// Current jar contents
    pub fn cookies(&self) -> Result<Vec<Cookie>> {
        self.jar.snapshot()
    }

    fn execute(
        &mut self,
        method: HttpMethod,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.jar.clear_expired();

        let mut hop = Hop {
            method,
            url: uri.clone(),
            headers: headers.to_vec(),
            content_type,
            body,
        };
        let mut redirects = 0;

        loop {
            let response = self.send(&hop)?;
            self.jar.store_response_cookies(&hop.url, response.headers());

            if !self.follow_redirects {
                return self.finish(response, &hop.url);
            }
            let Some(next) = redirect_target(&hop.url, &response) else {
                return self.finish(response, &hop.url);
            };
            if redirects >= self.max_redirects {
                return Err(ProbeError::TooManyRedirects {
                    limit: self.max_redirects,
                    url: next.to_string(),
                });
            }
            redirects += 1;

            log::debug!(
                "Following {} redirect {} -> {}",
                response.status().as_u16(),
                hop.url,
                next
            );
            if rewrites_to_get(response.status()) {
                hop.method = HttpMethod::Get;
                hop.body = None;
                hop.content_type = None;
            }
            if !same_origin(&hop.url, &next) {
                hop.headers.retain(|header| !is_sensitive(header));
            }
            hop.url = next;
        }
    }

    fn send(&self, hop: &Hop<'_>) -> Result<reqwest::blocking::Response> {
        let Hop {
            method,
            url,
            headers,
            content_type,
            body,
        } = hop;
        let mut request = self.client.request((*method).into(), url.clone());

        // Caller supplied Cookie headers are folded into the jar's header.
        let jar_cookies = self.jar.header_for(url);
        for header in headers {
            if jar_cookies.is_some() && header.is(COOKIE.as_str()) {
                continue;
            }
            let (name, value) = header.to_native()?;
            request = request.header(name, value);
        }

        if let Some(jar_cookies) = jar_cookies {
            let mut values: Vec<&str> = headers
                .iter()
                .filter(|header| header.is(COOKIE.as_str()))
                .map(Header::value)
                .collect();
            values.push(&jar_cookies);
            let (name, value) = Header::new(COOKIE.as_str(), values.join("; ")).to_native()?;
            request = request.header(name, value);
        }

        if let Some(body) = body {
            match content_type {
                Some(content_type) => {
                    let (name, value) = Header::new(CONTENT_TYPE.as_str(), *content_type).to_native()?;
                    request = request.header(name, value);
                }
                None => log::warn!("Content type is not set up for request {} {}", method, url),
            }
            request = request.body(body.to_string());
        }

        log::debug!("Executing request {} {}", method, url);
        if let Some(body) = body {
            log::debug!("Body being sent: {}", body);
        }

        Ok(request.send()?)
    }

    fn finish(&self, response: reqwest::blocking::Response, url: &Url) -> Result<Response> {
        let status_code = response.status().as_u16();
        let response_headers = Header::from_native_map(response.headers());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| Header::from_native(&CONTENT_TYPE, value));

        let body = response.text()?;
        log::debug!("Received {} from {}", status_code, url);

        Ok(Response::builder()
            .status_code(status_code)
            .body(body)
            .headers(response_headers)
            .content_type(content_type)
            .cookies(self.jar.snapshot()?)
            .build())
    }
}

/// Where a redirect response points, resolved against the request URL.
///
/// `None` for non-redirect statuses, `300`/`304`, a missing `Location` or
/// one that doesn't resolve to an http(s) URL.
fn redirect_target(current: &Url, response: &reqwest::blocking::Response) -> Option<Url> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {}
        _ => return None,
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    match current.join(location) {
        Ok(next) if matches!(next.scheme(), "http" | "https") => Some(next),
        Ok(next) => {
            log::warn!("Not following redirect to unsupported scheme: {}", next);
            None
        }
        Err(e) => {
            log::warn!("Not following redirect with invalid location '{}': {}", location, e);
            None
        }
    }
}

/// 301, 302 and 303 re-issue as a bodiless GET; 307 and 308 replay as-is.
fn rewrites_to_get(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER
    )
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

/// Credentials that must not follow a redirect to another origin
fn is_sensitive(header: &Header) -> bool {
    [AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE]
        .iter()
        .any(|name| header.is(name.as_str()))
}

impl HttpAdapter for ReqwestAdapter {
    fn get(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        self.execute(HttpMethod::Get, uri, headers, None, None)
    }

    fn post(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.execute(HttpMethod::Post, uri, headers, content_type, body)
    }

    fn put(
        &mut self,
        uri: &Url,
        headers: &[Header],
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        self.execute(HttpMethod::Put, uri, headers, content_type, body)
    }

    fn delete(&mut self, uri: &Url, headers: &[Header]) -> Result<Response> {
        self.execute(HttpMethod::Delete, uri, headers, None, None)
    }

    fn add_cookies(&mut self, cookies: &[Cookie]) -> Result<()> {
        self.jar.add_all(cookies)
    }

    fn clear_cookies(&mut self) {
        self.jar.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{is_sensitive, rewrites_to_get, same_origin, ReqwestAdapter};
    use crate::config::{AdapterConfig, ProxyConfig, SslConfig};
    use crate::error::ProbeError;
    use crate::http::adapter::HttpAdapter;
    use crate::http::cookie::Cookie;
    use crate::http::header::Header;
    use reqwest::StatusCode;
    use tempfile::tempdir;
    use url::Url;

    #[test]
    fn new_rejects_missing_ca_certificate() {
        let temp = tempdir().expect("tempdir");
        let config = AdapterConfig {
            ssl: SslConfig {
                verify_certs: true,
                ca_cert_file: Some(temp.path().join("missing.pem")),
            },
            ..AdapterConfig::default()
        };
        let err = ReqwestAdapter::new(config).err().expect("missing ca");
        assert!(matches!(err, ProbeError::Config(_)));
    }

    #[test]
    fn new_rejects_invalid_proxy() {
        let config = AdapterConfig {
            proxy: Some(ProxyConfig {
                url: "::not a url::".to_string(),
                username: None,
                password: None,
            }),
            ..AdapterConfig::default()
        };
        let err = ReqwestAdapter::new(config).err().expect("invalid proxy");
        assert!(matches!(err, ProbeError::Config(_)));
    }

    #[test]
    fn add_and_clear_cookies_manage_the_jar() {
        let mut adapter = ReqwestAdapter::with_defaults().expect("adapter");
        let cookie = Cookie::builder()
            .name("session")
            .value("abc")
            .domain("example.test")
            .build()
            .expect("cookie");

        adapter.add_cookies(&[cookie.clone()]).expect("add");
        assert_eq!(adapter.cookies().expect("cookies"), vec![cookie]);

        adapter.clear_cookies();
        assert!(adapter.cookies().expect("cookies").is_empty());
    }

    #[test]
    fn see_other_and_found_become_get() {
        assert!(rewrites_to_get(StatusCode::MOVED_PERMANENTLY));
        assert!(rewrites_to_get(StatusCode::FOUND));
        assert!(rewrites_to_get(StatusCode::SEE_OTHER));
        assert!(!rewrites_to_get(StatusCode::TEMPORARY_REDIRECT));
        assert!(!rewrites_to_get(StatusCode::PERMANENT_REDIRECT));
    }

    #[test]
    fn origin_compares_scheme_host_and_effective_port() {
        let url = |s: &str| Url::parse(s).expect("url");
        assert!(same_origin(&url("http://a.test/x"), &url("http://a.test:80/y")));
        assert!(!same_origin(&url("http://a.test/"), &url("https://a.test/")));
        assert!(!same_origin(&url("http://a.test/"), &url("http://b.test/")));
        assert!(!same_origin(&url("http://a.test:8080/"), &url("http://a.test:8081/")));
    }

    #[test]
    fn credentials_are_sensitive() {
        assert!(is_sensitive(&Header::new("Authorization", "Basic eA==")));
        assert!(is_sensitive(&Header::new("cookie", "a=1")));
        assert!(!is_sensitive(&Header::new("Accept", "*/*")));
    }

    #[test]
    fn proxy_with_username_only_still_builds() {
        let config = AdapterConfig {
            proxy: Some(ProxyConfig {
                url: "http://proxy.test:3128".to_string(),
                username: Some("user".to_string()),
                password: None,
            }),
            ..AdapterConfig::default()
        };
        assert!(ReqwestAdapter::new(config).is_ok());
    }
}
