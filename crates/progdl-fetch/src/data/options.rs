use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sockets per scheme when no limit is given.
pub const DEFAULT_MAX_SOCKETS: usize = 2;

/// Request setup timeout when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Connection settings for a download session.
///
/// The same limits apply to the plain HTTP pool and to the TLS pool.
///
/// # Examples
///
/// ```
/// use progdl_fetch::DownloadConfig;
/// use std::time::Duration;
///
/// let config = DownloadConfig::default()
///     .max_sockets(4)
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.max_sockets, 4);
/// ```
///
/// Host tools can embed it in their own configuration files:
///
/// ```
/// use progdl_fetch::DownloadConfig;
///
/// let config: DownloadConfig = serde_json::from_str(r#"{ "timeout_ms": 5000 }"#).unwrap();
/// assert_eq!(config.max_sockets, 2);
/// assert_eq!(config.timeout.as_millis(), 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Upper bound on concurrent connections per scheme.
    ///
    /// Default: 2
    pub max_sockets: usize,

    /// Budget for establishing a request: waiting for a free socket,
    /// connecting, and receiving the response headers. Body streaming is not
    /// bounded.
    ///
    /// Default: 60 s
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_sockets: DEFAULT_MAX_SOCKETS,
            timeout:     DEFAULT_TIMEOUT,
        }
    }
}

impl DownloadConfig {
    #[must_use]
    pub fn max_sockets(mut self, max_sockets: usize) -> Self {
        self.max_sockets = max_sockets;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn timeout_ms(self, millis: u64) -> Self { self.timeout(Duration::from_millis(millis)) }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
