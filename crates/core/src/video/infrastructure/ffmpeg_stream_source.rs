use ffmpeg_next::format::context::{Context, Input};
use ffmpeg_next::format::{Format, Pixel};
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video;
use ffmpeg_next::{Dictionary, Packet};

use crate::shared::channel_order::ChannelOrder;
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::shared::open_options::OpenOptions;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_kind::StreamTarget;

/// Pulls frames from a video file, capture device or network stream via
/// ffmpeg-next (libavformat + libavcodec + libavdevice).
///
/// Decoded pictures are converted to packed BGR24 at their native size.
/// There is no frame store: every [`read`](FrameSource::read) decodes.
pub struct FfmpegStreamSource {
    descriptor: String,
    input: Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: Option<(ScalerKey, scaling::Context)>,
    video_stream_index: usize,
    total_frames: Option<usize>,
    frame_index: usize,
    flushing: bool,
    done: bool,
}

/// Source geometry a scaler was built for; rebuilt when a stream changes size.
#[derive(Clone, Copy, PartialEq, Eq)]
struct ScalerKey {
    format: Pixel,
    width: u32,
    height: u32,
}

impl FfmpegStreamSource {
    pub fn open(target: &StreamTarget, options: &OpenOptions) -> Result<Self, CaptureError> {
        let descriptor = describe(target);
        let ffmpeg_err = |source| CaptureError::Ffmpeg {
            descriptor: descriptor.clone(),
            source,
        };

        ffmpeg_next::init().map_err(ffmpeg_err)?;
        let input = open_input(target, options, &descriptor)?;

        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| CaptureError::NoVideoStream {
                descriptor: descriptor.clone(),
            })?;
        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(ffmpeg_err)?;
        let decoder = codec_ctx.decoder().video().map_err(ffmpeg_err)?;

        // Only container-backed files carry a meaningful count.
        let total_frames = match target {
            StreamTarget::File(_) => usize::try_from(stream.frames()).ok().filter(|&n| n > 0),
            StreamTarget::Device(_) | StreamTarget::Url(_) => None,
        };

        Ok(Self {
            descriptor,
            input,
            decoder,
            scaler: None,
            video_stream_index,
            total_frames,
            frame_index: 0,
            flushing: false,
            done: false,
        })
    }

    fn try_receive(&mut self) -> Option<Result<Frame, ffmpeg_next::Error>> {
        let mut decoded = Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_ok() {
            Some(self.to_bgr(&decoded))
        } else {
            None
        }
    }

    fn to_bgr(&mut self, decoded: &Video) -> Result<Frame, ffmpeg_next::Error> {
        let key = ScalerKey {
            format: decoded.format(),
            width: decoded.width(),
            height: decoded.height(),
        };
        if key.width == 0 || key.height == 0 {
            return Err(ffmpeg_next::Error::InvalidData);
        }

        let scaler = match self.scaler.take() {
            Some((cached, scaler)) if cached == key => scaler,
            _ => scaling::Context::get(
                key.format,
                key.width,
                key.height,
                Pixel::BGR24,
                key.width,
                key.height,
                scaling::Flags::BILINEAR,
            )?,
        };
        let scaler = &mut self.scaler.insert((key, scaler)).1;

        let mut bgr_frame = Video::empty();
        scaler.run(decoded, &mut bgr_frame)?;

        let pixels = extract_packed_pixels(&bgr_frame, key.width, key.height);
        let frame = Frame::new(
            pixels,
            key.width,
            key.height,
            ChannelOrder::Bgr,
            self.frame_index,
        );
        self.frame_index += 1;
        Ok(frame)
    }

    fn next_frame(&mut self) -> Option<Result<Frame, ffmpeg_next::Error>> {
        if let Some(result) = self.try_receive() {
            return Some(result);
        }

        if self.flushing {
            return None;
        }

        loop {
            let mut packet = Packet::empty();
            match packet_read_outcome(packet.read(&mut self.input)) {
                PacketRead::Ready => {}
                PacketRead::Retry => continue,
                PacketRead::EndOfInput => {
                    let _ = self.decoder.send_eof();
                    self.flushing = true;
                    return self.try_receive();
                }
                PacketRead::Failed(e) => return Some(Err(e)),
            }

            if packet.stream() != self.video_stream_index {
                continue;
            }

            if let Err(e) = self.decoder.send_packet(&packet) {
                return Some(Err(e));
            }

            if let Some(result) = self.try_receive() {
                return Some(result);
            }
        }
    }
}

/// Outcome of a single demuxer read.
#[derive(Debug, PartialEq)]
enum PacketRead {
    Ready,
    /// The input has nothing yet (non-blocking devices).
    Retry,
    EndOfInput,
    /// Timeouts, disconnects and corrupt input all end the stream.
    Failed(ffmpeg_next::Error),
}

fn packet_read_outcome(result: Result<(), ffmpeg_next::Error>) -> PacketRead {
    match result {
        Ok(()) => PacketRead::Ready,
        Err(ffmpeg_next::Error::Eof) => PacketRead::EndOfInput,
        Err(ffmpeg_next::Error::Other {
            errno: ffmpeg_next::util::error::EAGAIN,
        }) => PacketRead::Retry,
        Err(e) => PacketRead::Failed(e),
    }
}

impl FrameSource for FfmpegStreamSource {
    fn read(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        match self.next_frame() {
            Some(Ok(frame)) => Some(frame),
            Some(Err(e)) => {
                log::warn!(
                    "{}: read failed after {} frames, ending stream: {e}",
                    self.descriptor,
                    self.frame_index
                );
                self.done = true;
                None
            }
            None => {
                log::debug!(
                    "{}: end of stream after {} frames",
                    self.descriptor,
                    self.frame_index
                );
                self.done = true;
                None
            }
        }
    }

    fn length(&mut self) -> Option<usize> {
        self.total_frames
    }

    fn restart(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::RestartUnsupported)
    }
}

fn describe(target: &StreamTarget) -> String {
    match target {
        StreamTarget::File(path) => path.display().to_string(),
        StreamTarget::Device(index) => format!("device {index}"),
        StreamTarget::Url(url) => url.clone(),
    }
}

fn open_input(
    target: &StreamTarget,
    options: &OpenOptions,
    descriptor: &str,
) -> Result<Input, CaptureError> {
    let ffmpeg_err = |source| CaptureError::Ffmpeg {
        descriptor: descriptor.to_string(),
        source,
    };

    match target {
        StreamTarget::File(path) => ffmpeg_next::format::input(path).map_err(ffmpeg_err),
        StreamTarget::Url(url) => {
            ffmpeg_next::format::input_with_dictionary(url, stream_options(options))
                .map_err(ffmpeg_err)
        }
        StreamTarget::Device(index) => {
            let name = options.device_format();
            let format = ffmpeg_next::device::input::video()
                .find(|f| f.name() == name)
                .ok_or_else(|| CaptureError::NoDeviceBackend {
                    name: name.to_string(),
                    index: *index,
                })?;
            let ctx = ffmpeg_next::format::open_with(
                &device_path(name, *index),
                &Format::Input(format),
                Dictionary::new(),
            )
            .map_err(ffmpeg_err)?;
            match ctx {
                Context::Input(input) => Ok(input),
                Context::Output(_) => Err(CaptureError::NoDeviceBackend {
                    name: name.to_string(),
                    index: *index,
                }),
            }
        }
    }
}

/// Demuxer options for network inputs. Both keys are in microseconds:
/// `rw_timeout` covers generic protocols, `timeout` covers RTSP sockets.
fn stream_options(options: &OpenOptions) -> Dictionary<'static> {
    let mut dict = Dictionary::new();
    if let Some(timeout) = options.stream_timeout {
        let micros = timeout.as_micros().to_string();
        dict.set("rw_timeout", &micros);
        dict.set("timeout", &micros);
    }
    dict
}

/// Maps a device index to the filename the capture demuxer expects.
fn device_path(format: &str, index: u32) -> String {
    match format {
        "v4l2" => format!("/dev/video{index}"),
        _ => index.to_string(),
    }
}

/// Copies a packed 3-byte-per-pixel plane into a tightly packed buffer.
///
/// ffmpeg rows may carry padding past `width * 3`; it is dropped here.
fn extract_packed_pixels(frame: &Video, width: u32, height: u32) -> Vec<u8> {
    let stride = frame.stride(0);
    let data = frame.data(0);
    let row_bytes = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_bytes]);
    }
    pixels
}
