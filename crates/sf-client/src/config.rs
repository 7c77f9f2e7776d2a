//! Transport settings.

use std::time::Duration;

/// How long the transport waits at each stage of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Whole request, from send to the last body byte.
    pub request: Duration,
    /// TCP + TLS handshake.
    pub connect: Duration,
    /// How long an unused pooled connection is kept open.
    pub pool_idle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            connect: Duration::from_secs(10),
            pool_idle: Duration::from_secs(90),
        }
    }
}

/// Settings for [`SfHttpClient`](crate::SfHttpClient).
///
/// There is no retry policy: a call that times out or is throttled comes back
/// as an error on the first attempt.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeouts: Timeouts,
    pub pool_max_idle_per_host: usize,
    /// Send `Accept-Encoding: gzip, deflate` and decode transparently.
    pub accept_compressed: bool,
    pub user_agent: String,
    /// Emit a `debug` event per request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeouts: Timeouts::default(),
            pool_max_idle_per_host: 10,
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
///
/// ```rust
/// use std::time::Duration;
/// use sfquerier_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .with_timeout(Duration::from_secs(120))
///     .with_user_agent("nightly-purge/1.0")
///     .build();
/// assert_eq!(config.timeouts.request, Duration::from_secs(120));
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.request = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.connect = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.pool_idle = timeout;
        self
    }

    /// Replace all three timeouts at once.
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.accept_compressed);
        assert!(config.enable_tracing);
        assert_eq!(config.timeouts.request, Duration::from_secs(30));
        assert_eq!(config.timeouts.connect, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("sfquerier/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5))
            .with_compression(false)
            .with_tracing(false)
            .with_user_agent("crm-sync/2.1")
            .with_pool_idle_timeout(Duration::from_secs(30))
            .with_pool_max_idle(4)
            .build();

        assert!(!config.accept_compressed);
        assert!(!config.enable_tracing);
        assert_eq!(config.timeouts.request, Duration::from_secs(60));
        assert_eq!(config.timeouts.connect, Duration::from_secs(5));
        assert_eq!(config.timeouts.pool_idle, Duration::from_secs(30));
        assert_eq!(config.pool_max_idle_per_host, 4);
        assert_eq!(config.user_agent, "crm-sync/2.1");
    }

    #[test]
    fn test_with_timeouts_replaces_all() {
        let timeouts = Timeouts {
            request: Duration::from_secs(5),
            connect: Duration::from_secs(1),
            pool_idle: Duration::from_secs(15),
        };
        let config = ClientConfig::builder().with_timeouts(timeouts).build();
        assert_eq!(config.timeouts, timeouts);
    }
}
