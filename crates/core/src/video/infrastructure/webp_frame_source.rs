use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image_webp::{DecodingError, WebPDecoder};

use crate::shared::channel_order::{pack_rgb, ChannelOrder};
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Reads WebP frames one at a time, decoding only when asked.
///
/// The frame count comes straight from the container header, so
/// [`length`](FrameSource::length) never decodes pixels. A still WebP is
/// treated as a one-frame animation.
pub struct WebpFrameSource {
    path: PathBuf,
    decoder: WebPDecoder<BufReader<File>>,
    animated: bool,
    total: usize,
    position: usize,
    exhausted: bool,
}

impl WebpFrameSource {
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let file = File::open(path).map_err(|source| CaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder =
            WebPDecoder::new(BufReader::new(file)).map_err(|source| CaptureError::WebP {
                path: path.to_path_buf(),
                source,
            })?;

        let animated = decoder.is_animated();
        let total = if animated {
            decoder.num_frames() as usize
        } else {
            1
        };
        if total == 0 {
            return Err(CaptureError::EmptySource {
                descriptor: path.display().to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            decoder,
            animated,
            total,
            position: 0,
            exhausted: false,
        })
    }

    fn decode_next(&mut self) -> Result<Frame, DecodingError> {
        let (width, height) = self.decoder.dimensions();
        let size = self
            .decoder
            .output_buffer_size()
            .ok_or(DecodingError::ImageTooLarge)?;
        let mut buf = vec![0u8; size];
        if self.animated {
            self.decoder.read_frame(&mut buf)?;
        } else {
            self.decoder.read_image(&mut buf)?;
        }

        let bytes_per_pixel = size / (width as usize * height as usize);
        let rgb = pack_rgb(buf, bytes_per_pixel);
        Ok(Frame::new(rgb, width, height, ChannelOrder::Rgb, self.position).into_canonical())
    }
}

impl FrameSource for WebpFrameSource {
    fn read(&mut self) -> Option<Frame> {
        if self.exhausted || self.position >= self.total {
            return None;
        }
        match self.decode_next() {
            Ok(frame) => {
                self.position += 1;
                Some(frame)
            }
            Err(e) => {
                log::warn!(
                    "{}: frame {} failed to decode, ending pass: {e}",
                    self.path.display(),
                    self.position
                );
                self.exhausted = true;
                None
            }
        }
    }

    fn length(&mut self) -> Option<usize> {
        Some(self.total)
    }

    fn restart(&mut self) -> Result<(), CaptureError> {
        // a still image is decoded from its chunk offset on every read
        if self.animated {
            self.decoder
                .reset_animation()
                .map_err(|source| CaptureError::WebP {
                    path: self.path.clone(),
                    source,
                })?;
        }
        self.position = 0;
        self.exhausted = false;
        Ok(())
    }
}
