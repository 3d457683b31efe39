use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{AnimationDecoder, ImageError, RgbaImage};

use crate::shared::channel_order::{pack_rgb, ChannelOrder};
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_kind::AnimatedFormat;

/// Serves GIF and APNG frames from a fully decoded in-memory store.
///
/// Both formats composite each frame over the previous canvas (disposal and
/// blending), so the whole animation is decoded in a single pass up front.
/// Stored frames stay RGB; each read hands out a BGR copy.
pub struct AnimatedImageSource {
    path: PathBuf,
    format: AnimatedFormat,
    store: Vec<Frame>,
    next: usize,
}

impl AnimatedImageSource {
    pub fn open(path: &Path, format: AnimatedFormat) -> Result<Self, CaptureError> {
        let store = decode_all(path, format)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            store,
            next: 0,
        })
    }

    pub fn format(&self) -> AnimatedFormat {
        self.format
    }

    fn ensure_decoded(&mut self) -> Result<(), CaptureError> {
        if self.store.is_empty() {
            self.store = decode_all(&self.path, self.format)?;
        }
        Ok(())
    }
}

impl FrameSource for AnimatedImageSource {
    fn read(&mut self) -> Option<Frame> {
        let frame = self.store.get(self.next)?.clone();
        self.next += 1;
        Some(frame.into_canonical())
    }

    fn length(&mut self) -> Option<usize> {
        match self.ensure_decoded() {
            Ok(()) => Some(self.store.len()),
            Err(e) => {
                log::warn!("{}: {e}", self.path.display());
                None
            }
        }
    }

    fn restart(&mut self) -> Result<(), CaptureError> {
        // the old store stays in place if the re-decode fails
        self.store = decode_all(&self.path, self.format)?;
        self.next = 0;
        Ok(())
    }
}

/// Decodes every composited frame of `path` into RGB frames.
fn decode_all(path: &Path, format: AnimatedFormat) -> Result<Vec<Frame>, CaptureError> {
    let file = File::open(path).map_err(|source| CaptureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let images = match format {
        #[cfg(feature = "gif")]
        AnimatedFormat::Gif => decode_gif(reader),
        #[cfg(feature = "apng")]
        AnimatedFormat::Apng => decode_apng(reader),
        #[allow(unreachable_patterns)]
        other => {
            return Err(CaptureError::MissingDependency {
                format: other.name(),
                feature: other.feature(),
            })
        }
    }
    .map_err(|source| CaptureError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let frames: Vec<Frame> = images
        .into_iter()
        .filter(|img| img.width() > 0 && img.height() > 0)
        .enumerate()
        .map(|(index, img)| {
            let (width, height) = img.dimensions();
            let rgb = pack_rgb(img.into_raw(), 4);
            Frame::new(rgb, width, height, ChannelOrder::Rgb, index)
        })
        .collect();

    if frames.is_empty() {
        return Err(CaptureError::EmptySource {
            descriptor: path.display().to_string(),
        });
    }
    log::debug!("{}: decoded {} frames", path.display(), frames.len());
    Ok(frames)
}

#[cfg(feature = "gif")]
fn decode_gif(reader: BufReader<File>) -> Result<Vec<RgbaImage>, ImageError> {
    let decoder = image::codecs::gif::GifDecoder::new(reader)?;
    collect_buffers(decoder)
}

#[cfg(feature = "apng")]
fn decode_apng(reader: BufReader<File>) -> Result<Vec<RgbaImage>, ImageError> {
    let decoder = image::codecs::png::PngDecoder::new(reader)?;
    if decoder.is_apng()? {
        collect_buffers(decoder.apng()?)
    } else {
        // a plain PNG is a one-frame animation
        let still = image::DynamicImage::from_decoder(decoder)?;
        Ok(vec![still.to_rgba8()])
    }
}

fn collect_buffers<'a, D: AnimationDecoder<'a>>(
    decoder: D,
) -> Result<Vec<RgbaImage>, ImageError> {
    decoder
        .into_frames()
        .map(|frame| frame.map(image::Frame::into_buffer))
        .collect()
}
