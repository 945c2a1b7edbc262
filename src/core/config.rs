//! Client configuration from environment variables.
//!
//! On the server, call `dotenvy::dotenv()` before `Config::from_env()`.
//! WebAssembly builds have no process environment, so the API URL is baked in
//! at compile time from the same variable.

use std::time::Duration;

/// Environment variable selecting the REST backend base URL
pub const API_URL_ENV: &str = "HRMS_API_URL";

/// Environment variable overriding the native request timeout (seconds)
pub const REQUEST_TIMEOUT_ENV: &str = "HRMS_REQUEST_TIMEOUT_SECS";

/// Backend used when nothing is configured (local development server)
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Request timeout applied by the native transport
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every service path is appended to, without a trailing slash
    /// Example: https://hr.example.com/api
    pub api_url: String,

    /// Timeout for a single HTTP exchange (native transport only)
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the runtime environment, falling back to the
    /// compile-time value and then to the development default.
    pub fn from_env() -> Self {
        let api_url = resolve_api_url(
            std::env::var(API_URL_ENV).ok(),
            option_env!("HRMS_API_URL"),
        );
        let request_timeout = std::env::var(REQUEST_TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            api_url,
            request_timeout,
        }
    }

    /// Configuration pointing at an explicit backend
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize(&api_url.into()).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Full URL for a service path such as `/employees`
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve_api_url(runtime: Option<String>, build_time: Option<&str>) -> String {
    runtime
        .as_deref()
        .and_then(normalize)
        .or_else(|| build_time.and_then(normalize))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
