use crate::dispatch::source_classifier::classify;
use crate::shared::capabilities::Capabilities;
use crate::shared::error::CaptureError;
use crate::shared::open_options::OpenOptions;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_kind::{AnimatedFormat, SourceKind};
use crate::video::infrastructure::ffmpeg_stream_source::FfmpegStreamSource;

/// Opens `descriptor` with default [`OpenOptions`].
pub fn open(descriptor: &str) -> Result<Box<dyn FrameSource>, CaptureError> {
    open_with(descriptor, &OpenOptions::default())
}

/// Classifies `descriptor`, opens the matching source and confirms it is
/// readable before returning it.
///
/// Logs one line with the detected category and, where known, the frame
/// count.
pub fn open_with(
    descriptor: &str,
    options: &OpenOptions,
) -> Result<Box<dyn FrameSource>, CaptureError> {
    let kind = classify(descriptor)?;
    let mut source: Box<dyn FrameSource> = match &kind {
        SourceKind::AnimatedLazy(format) | SourceKind::AnimatedEager(format) => {
            Capabilities::current().require(*format)?;
            open_animated(descriptor, *format)?
        }
        SourceKind::Stream(target) => Box::new(FfmpegStreamSource::open(target, options)?),
    };

    match source.length() {
        Some(n) => log::info!("{kind}: {n} frames"),
        None => log::info!("{kind}: frame count unknown"),
    }
    Ok(source)
}

fn open_animated(
    descriptor: &str,
    format: AnimatedFormat,
) -> Result<Box<dyn FrameSource>, CaptureError> {
    let path = std::path::Path::new(descriptor);
    match format {
        #[cfg(feature = "webp")]
        AnimatedFormat::WebP => Ok(Box::new(
            crate::video::infrastructure::webp_frame_source::WebpFrameSource::open(path)?,
        )),
        #[cfg(any(feature = "gif", feature = "apng"))]
        AnimatedFormat::Gif | AnimatedFormat::Apng => Ok(Box::new(
            crate::video::infrastructure::animated_image_source::AnimatedImageSource::open(
                path, format,
            )?,
        )),
        #[allow(unreachable_patterns)]
        other => Err(CaptureError::MissingDependency {
            format: other.name(),
            feature: other.feature(),
        }),
    }
}
