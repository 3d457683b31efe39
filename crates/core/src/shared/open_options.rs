use std::time::Duration;

use crate::shared::constants::{DEFAULT_DEVICE_FORMAT, DEFAULT_STREAM_TIMEOUT_MS};

/// Settings that influence how a descriptor is opened.
///
/// Only stream sources consult these; animated images ignore them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
    /// I/O timeout for network streams. `None` blocks indefinitely.
    pub stream_timeout: Option<Duration>,
    /// Capture demuxer used for device indices (e.g. `v4l2`). `None` picks
    /// the platform default.
    pub device_format: Option<String>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            stream_timeout: Some(Duration::from_millis(DEFAULT_STREAM_TIMEOUT_MS)),
            device_format: None,
        }
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_timeout = timeout;
        self
    }

    pub fn with_device_format(mut self, name: impl Into<String>) -> Self {
        self.device_format = Some(name.into());
        self
    }

    pub fn device_format(&self) -> &str {
        self.device_format.as_deref().unwrap_or(DEFAULT_DEVICE_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_timeout() {
        let opts = OpenOptions::default();
        assert_eq!(opts.stream_timeout, Some(Duration::from_secs(10)));
        assert_eq!(opts.device_format(), DEFAULT_DEVICE_FORMAT);
    }

    #[test]
    fn test_builders_override() {
        let opts = OpenOptions::new()
            .with_stream_timeout(None)
            .with_device_format("dshow");
        assert_eq!(opts.stream_timeout, None);
        assert_eq!(opts.device_format(), "dshow");
    }
}
