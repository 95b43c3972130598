use std::time::Duration;

use crate::{EventError, EventResult};

/// Default prefix for environment overrides
pub const DEFAULT_ENV_PREFIX: &str = "DOG_EVENTS__";

/// Configuration for the event publisher's backend connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Connection URL of the list store (`redis://[:password@]host:port/db`)
    pub redis_url: String,

    /// Upper bound on establishing the shared connection
    pub connect_timeout: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl PublisherConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend URL
    pub fn with_redis_url<S: Into<String>>(mut self, url: S) -> Self {
        self.redis_url = url.into();
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Load overrides from the process environment.
    ///
    /// Reads `<PREFIX>REDIS_URL` and `<PREFIX>CONNECT_TIMEOUT_MS`, e.g.
    /// `DOG_EVENTS__REDIS_URL=redis://cache:6379/2`.
    pub fn from_env(prefix: &str) -> EventResult<Self> {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Load overrides from an arbitrary set of key/value pairs
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> EventResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(prefix) else {
                continue;
            };
            match name.to_lowercase().as_str() {
                "redis_url" => config.redis_url = value.into(),
                "connect_timeout_ms" => {
                    let raw: String = value.into();
                    let millis = raw.trim().parse::<u64>().map_err(|_| {
                        EventError::invalid_argument(
                            "connect_timeout_ms",
                            format!("expected milliseconds, got {:?}", raw),
                        )
                    })?;
                    config.connect_timeout = Duration::from_millis(millis);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// URL with any password masked, safe for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.redis_url.split_once("://") else {
            return self.redis_url.clone();
        };
        match rest.rsplit_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.redis_url.clone(),
        }
    }
}
