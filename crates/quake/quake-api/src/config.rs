//! Service configuration.

use std::path::PathBuf;

use quake_spi::{QuakeError, Result};
use serde::{Deserialize, Serialize};

/// USGS FDSN event query endpoint.
pub const DEFAULT_USGS_API_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Where the server looks for the model artifact unless told otherwise.
pub const DEFAULT_MODEL_PATH: &str = "models/magnitude_model.json";

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Event catalog endpoint
    pub usgs_api_url: String,
    /// Model artifact location
    pub model_path: PathBuf,
    /// Origin allowed by CORS
    pub cors_allowed_origin: String,
    /// Outbound request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            usgs_api_url: DEFAULT_USGS_API_URL.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            cors_allowed_origin: "http://localhost:3000".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Read settings from process environment variables.
    ///
    /// Recognised: `HOST`, `PORT`, `USGS_API_URL`, `QUAKE_MODEL_PATH`,
    /// `CORS_ALLOWED_ORIGIN`, `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(url) = lookup("USGS_API_URL") {
            config.usgs_api_url = url;
        }
        if let Some(path) = lookup("QUAKE_MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(origin) = lookup("CORS_ALLOWED_ORIGIN") {
            config.cors_allowed_origin = origin;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_number("HTTP_TIMEOUT_SECS", &secs)?;
            if config.http_timeout_secs == 0 {
                return Err(QuakeError::InvalidParameter {
                    name: "HTTP_TIMEOUT_SECS".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(config)
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| QuakeError::InvalidParameter {
        name: name.to_string(),
        reason: format!("'{}' is not a valid number", raw),
    })
}
