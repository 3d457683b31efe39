use std::sync::OnceLock;

use crate::shared::error::CaptureError;
use crate::video::domain::source_kind::AnimatedFormat;

/// Animated-image decoders compiled into this build.
///
/// Determined once per process; the first call logs the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub webp: bool,
    pub gif: bool,
    pub apng: bool,
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

impl Capabilities {
    pub fn current() -> &'static Capabilities {
        CAPABILITIES.get_or_init(|| {
            let caps = Capabilities {
                webp: cfg!(feature = "webp"),
                gif: cfg!(feature = "gif"),
                apng: cfg!(feature = "apng"),
            };
            log::debug!(
                "Animated image support: webp={} gif={} apng={}",
                caps.webp,
                caps.gif,
                caps.apng
            );
            caps
        })
    }

    pub fn supports(&self, format: AnimatedFormat) -> bool {
        match format {
            AnimatedFormat::WebP => self.webp,
            AnimatedFormat::Gif => self.gif,
            AnimatedFormat::Apng => self.apng,
        }
    }

    /// Fails with [`CaptureError::MissingDependency`] when `format` is not
    /// available in this build.
    pub fn require(&self, format: AnimatedFormat) -> Result<(), CaptureError> {
        if self.supports(format) {
            Ok(())
        } else {
            Err(CaptureError::MissingDependency {
                format: format.name(),
                feature: format.feature(),
            })
        }
    }
}
