use std::path::{Path, PathBuf};

use crate::shared::constants::{
    APNG_EXTENSIONS, GIF_EXTENSIONS, VIDEO_EXTENSIONS, WEBP_EXTENSIONS,
};
use crate::shared::error::CaptureError;
use crate::video::domain::source_kind::{AnimatedFormat, SourceKind, StreamTarget};

/// Maps a descriptor to the decoding strategy that should serve it.
///
/// Priority: animated-image extension, video extension, bare device index,
/// then anything else as a stream URL for libav to resolve. Video files
/// behind a `scheme://` are treated as URLs so network options apply. Only
/// descriptors that can never be opened are rejected.
pub fn classify(descriptor: &str) -> Result<SourceKind, CaptureError> {
    let unsupported = || CaptureError::UnsupportedFormat {
        descriptor: descriptor.to_string(),
    };

    if descriptor.trim().is_empty() {
        return Err(unsupported());
    }

    if let Some(ext) = extension(descriptor) {
        let ext = ext.as_str();
        if WEBP_EXTENSIONS.contains(&ext) {
            return Ok(SourceKind::AnimatedLazy(AnimatedFormat::WebP));
        }
        if GIF_EXTENSIONS.contains(&ext) {
            return Ok(SourceKind::AnimatedEager(AnimatedFormat::Gif));
        }
        if APNG_EXTENSIONS.contains(&ext) {
            return Ok(SourceKind::AnimatedEager(AnimatedFormat::Apng));
        }
        if VIDEO_EXTENSIONS.contains(&ext) && !has_url_scheme(descriptor) {
            return Ok(SourceKind::Stream(StreamTarget::File(PathBuf::from(
                descriptor,
            ))));
        }
    }

    if descriptor.bytes().all(|b| b.is_ascii_digit()) {
        // an index too large for any device can never be opened
        let index = descriptor.parse().map_err(|_| unsupported())?;
        return Ok(SourceKind::Stream(StreamTarget::Device(index)));
    }

    Ok(SourceKind::Stream(StreamTarget::Url(descriptor.to_string())))
}

fn extension(descriptor: &str) -> Option<String> {
    Path::new(descriptor)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// `scheme://rest` where the scheme is RFC 3986 shaped.
fn has_url_scheme(descriptor: &str) -> bool {
    let Some((scheme, rest)) = descriptor.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}
