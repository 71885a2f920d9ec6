//! SSL/TLS configuration and utilities

use crate::config::SslConfig;
use crate::error::{ProbeError, Result};
use std::path::Path;

/// SSL/TLS certificate utilities
pub struct SslUtils;

impl SslUtils {
    /// Validate SSL configuration
    pub fn validate_config(config: &SslConfig) -> Result<()> {
        if let Some(ca_cert) = &config.ca_cert_file {
            if !ca_cert.is_file() {
                return Err(ProbeError::Config(format!(
                    "CA certificate file not found: {:?}",
                    ca_cert
                )));
            }
        }

        Ok(())
    }

    /// Load a PEM encoded CA certificate to trust in addition to the system roots
    pub fn load_ca_certificate(path: &Path) -> Result<reqwest::Certificate> {
        let pem = std::fs::read(path)?;
        reqwest::Certificate::from_pem(&pem).map_err(|e| {
            ProbeError::Config(format!("Invalid CA certificate {:?}: {}", path, e))
        })
    }
}
