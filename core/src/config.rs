//! Transport configuration shared by every resource group.
//!
//! Built once, then frozen behind an `Arc` inside `ScheduleClient`.

use std::time::Duration;

/// Default origin of the scheduling service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Prefix of the versioned API routes. The health probe lives outside it.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Default request timeout in seconds.
/// Can be overridden via the AGENDA_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the service origin.
pub const BASE_URL_ENV: &str = "AGENDA_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "AGENDA_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_prefix: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Read the origin and timeout from the environment, keeping the default
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(&url);
        }

        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        self.api_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent on every request, replacing any previous value for
    /// the same (case-insensitive) name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        self.default_headers.retain(|(n, _)| *n != name);
        self.default_headers.push((name, value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Origin plus API prefix, e.g. `http://127.0.0.1:8000/api`.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    /// The bare origin, for routes outside the API prefix.
    pub fn root_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.api_url(), "http://127.0.0.1:8000/api");
        assert_eq!(config.root_url(), "http://127.0.0.1:8000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.default_headers(),
            &[("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.api_url(), "http://localhost:8000/api");
    }

    #[test]
    fn with_header_replaces_same_name() {
        let config = ClientConfig::default()
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_header("X-Client", "agenda");
        assert_eq!(
            config.default_headers(),
            &[
                (
                    "content-type".to_string(),
                    "application/json; charset=utf-8".to_string()
                ),
                ("x-client".to_string(), "agenda".to_string()),
            ]
        );
    }

    #[test]
    fn from_env_reads_url_and_timeout() {
        std::env::set_var(BASE_URL_ENV, "http://sched.example.com:9000/");
        std::env::set_var(TIMEOUT_ENV, "3");
        let config = ClientConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);

        assert_eq!(config.base_url(), "http://sched.example.com:9000");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
