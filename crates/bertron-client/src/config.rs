use std::env;
use std::time::Duration;

/// Production BERtron endpoint
pub const DEFAULT_BASE_URL: &str =
    "https://bertron-api.bertron.production.svc.spin.nersc.org/bertron/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("bertron-client-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`crate::BertronClient`]
#[derive(Debug, Clone)]
pub struct BertronConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Verify the server's TLS certificate. Off by default until the
    /// production endpoint has certificates provisioned.
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for BertronConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_tls: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl BertronConfig {
    /// Parse configuration from environment variables
    ///
    /// Reads `BERTRON_BASE_URL`, `BERTRON_TIMEOUT_SECS` and `BERTRON_VERIFY_TLS`,
    /// falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("BERTRON_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = lookup("BERTRON_TIMEOUT_SECS")
            .and_then(|t| t.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let verify_tls = lookup("BERTRON_VERIFY_TLS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.verify_tls);

        Self {
            base_url,
            timeout,
            verify_tls,
            user_agent: defaults.user_agent,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Base URL with trailing slashes removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
