use std::fmt;
use std::path::PathBuf;

/// Animated raster-image containers the crate can read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedFormat {
    WebP,
    Gif,
    Apng,
}

impl AnimatedFormat {
    pub fn name(self) -> &'static str {
        match self {
            AnimatedFormat::WebP => "WebP",
            AnimatedFormat::Gif => "GIF",
            AnimatedFormat::Apng => "APNG",
        }
    }

    /// Cargo feature that compiles in the decoder for this format.
    pub fn feature(self) -> &'static str {
        match self {
            AnimatedFormat::WebP => "webp",
            AnimatedFormat::Gif => "gif",
            AnimatedFormat::Apng => "apng",
        }
    }
}

/// What a stream source is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamTarget {
    File(PathBuf),
    Device(u32),
    /// Network URL, or any other name the demuxer resolves itself.
    Url(String),
}

/// Decoding strategy chosen for a descriptor.
///
/// WebP frames can be pulled one at a time; GIF and APNG frames are
/// composited across the whole animation, so they are decoded up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    AnimatedLazy(AnimatedFormat),
    AnimatedEager(AnimatedFormat),
    Stream(StreamTarget),
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::AnimatedLazy(format) => write!(f, "animated {} (lazy)", format.name()),
            SourceKind::AnimatedEager(format) => write!(f, "animated {} (eager)", format.name()),
            SourceKind::Stream(StreamTarget::File(path)) => {
                write!(f, "video file {}", path.display())
            }
            SourceKind::Stream(StreamTarget::Device(index)) => write!(f, "capture device {index}"),
            SourceKind::Stream(StreamTarget::Url(url)) => write!(f, "stream URL {url}"),
        }
    }
}
