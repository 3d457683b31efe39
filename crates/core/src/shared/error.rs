use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("unsupported source {descriptor:?}: nothing can be opened from it")]
    UnsupportedFormat { descriptor: String },

    #[error("{format} support is not compiled in (enable the `{feature}` feature)")]
    MissingDependency {
        format: &'static str,
        feature: &'static str,
    },

    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[cfg(feature = "webp")]
    #[error("failed to decode {path}: {source}")]
    WebP {
        path: PathBuf,
        #[source]
        source: image_webp::DecodingError,
    },

    #[error("ffmpeg could not open {descriptor}: {source}")]
    Ffmpeg {
        descriptor: String,
        #[source]
        source: ffmpeg_next::Error,
    },

    #[error("no video stream found in {descriptor}")]
    NoVideoStream { descriptor: String },

    #[error("{descriptor} contains no frames")]
    EmptySource { descriptor: String },

    #[error("no capture backend named {name:?} is available for device {index}")]
    NoDeviceBackend { name: String, index: u32 },

    #[error("this source cannot be restarted; open a new one")]
    RestartUnsupported,
}

impl CaptureError {
    /// True for errors raised because the underlying file, device or URL
    /// could not be opened or yielded nothing readable.
    pub fn is_open_failure(&self) -> bool {
        match self {
            CaptureError::Io { .. }
            | CaptureError::Image { .. }
            | CaptureError::Ffmpeg { .. }
            | CaptureError::NoVideoStream { .. }
            | CaptureError::EmptySource { .. }
            | CaptureError::NoDeviceBackend { .. } => true,
            #[cfg(feature = "webp")]
            CaptureError::WebP { .. } => true,
            CaptureError::UnsupportedFormat { .. }
            | CaptureError::MissingDependency { .. }
            | CaptureError::RestartUnsupported => false,
        }
    }
}
