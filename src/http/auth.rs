//! HTTP authentication header helpers

use super::header::Header;
use base64::Engine;
use reqwest::header::AUTHORIZATION;

/// Authentication helper
pub struct Auth;

impl Auth {
    /// `Authorization: Basic …` header for the given credentials
    pub fn basic_auth(username: &str, password: &str) -> Header {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        Header::new(AUTHORIZATION.as_str(), format!("Basic {}", encoded))
    }

    /// `Authorization: Bearer …` header for the given token
    pub fn bearer_token(token: &str) -> Header {
        Header::new(AUTHORIZATION.as_str(), format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::Auth;

    #[test]
    fn basic_auth_encodes_credentials() {
        let header = Auth::basic_auth("aladdin", "opensesame");
        assert_eq!(header.name(), "authorization");
        assert_eq!(header.value(), "Basic YWxhZGRpbjpvcGVuc2VzYW1l");
    }

    #[test]
    fn bearer_token_prefixes_scheme() {
        assert_eq!(Auth::bearer_token("t0k").value(), "Bearer t0k");
    }
}
