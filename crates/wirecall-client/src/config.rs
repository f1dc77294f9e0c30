use std::time::Duration;

/// Default cooldown between automatic reconnect attempts.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(1);

/// Connection behavior for a [`Client`](crate::Client).
///
/// Carried per client instance; two clients never share reconnect state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bound on active dials (initial and reconnect). `None` dials without
    /// a bound.
    pub connect_timeout: Option<Duration>,
    /// Minimum elapsed time between automatic reconnect attempts. Failed
    /// operations inside the window fail fast instead of redialing.
    pub reconnect_interval: Duration,
    /// Redial transparently after a failed operation.
    pub auto_reconnect: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            auto_reconnect: false,
        }
    }
}
