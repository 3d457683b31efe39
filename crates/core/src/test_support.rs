//! Fixture generators shared by the unit tests.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Solid-colour RGB frames; frame `i` is `(i*40, 100, 200)`.
pub fn solid_rgb_frames(count: usize, width: u32, height: u32) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let red = ((i * 40) % 256) as u8;
            [red, 100, 200].repeat((width * height) as usize)
        })
        .collect()
}

#[cfg(feature = "gif")]
pub fn write_gif(path: &Path, frames: &[Vec<u8>], width: u32, height: u32) {
    use image::codecs::gif::{GifEncoder, Repeat};

    let file = File::create(path).unwrap();
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite).unwrap();
    let frames = frames.iter().map(|rgb| {
        let rgba: Vec<u8> = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect();
        let buffer = image::RgbaImage::from_raw(width, height, rgba).unwrap();
        image::Frame::from_parts(buffer, 0, 0, image::Delay::from_numer_denom_ms(100, 1))
    });
    encoder.encode_frames(frames).unwrap();
}

#[cfg(feature = "apng")]
pub fn write_apng(path: &Path, frames: &[Vec<u8>], width: u32, height: u32) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_animated(frames.len() as u32, 0).unwrap();
    encoder.set_frame_delay(1, 10).unwrap();
    let mut writer = encoder.write_header().unwrap();
    for rgb in frames {
        writer.write_image_data(rgb).unwrap();
    }
    writer.finish().unwrap();
}

#[cfg(feature = "apng")]
pub fn write_png(path: &Path, rgb: &[u8], width: u32, height: u32) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(rgb).unwrap();
    writer.finish().unwrap();
}

#[cfg(feature = "webp")]
fn encode_lossless_webp(rgb: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    image_webp::WebPEncoder::new(&mut out)
        .encode(rgb, width, height, image_webp::ColorType::Rgb8)
        .unwrap();
    out
}

#[cfg(feature = "webp")]
pub fn write_webp(path: &Path, rgb: &[u8], width: u32, height: u32) {
    std::fs::write(path, encode_lossless_webp(rgb, width, height)).unwrap();
}

/// Writes an animated WebP by wrapping one lossless `VP8L` bitstream per
/// frame into `ANMF` chunks behind a `VP8X` + `ANIM` header.
#[cfg(feature = "webp")]
pub fn write_animated_webp(path: &Path, frames: &[Vec<u8>], width: u32, height: u32) {
    fn u24(value: u32) -> [u8; 3] {
        let b = value.to_le_bytes();
        [b[0], b[1], b[2]]
    }

    fn chunk(fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 9);
        out.extend_from_slice(fourcc);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    let mut vp8x = vec![0x02, 0, 0, 0]; // animation flag
    vp8x.extend_from_slice(&u24(width - 1));
    vp8x.extend_from_slice(&u24(height - 1));

    let mut anim = Vec::new();
    anim.extend_from_slice(&0u32.to_le_bytes()); // background colour
    anim.extend_from_slice(&0u16.to_le_bytes()); // loop forever

    let mut body = Vec::new();
    body.extend_from_slice(b"WEBP");
    body.extend(chunk(b"VP8X", &vp8x));
    body.extend(chunk(b"ANIM", &anim));
    for rgb in frames {
        let still = encode_lossless_webp(rgb, width, height);
        // RIFF header (12 bytes) followed by the VP8L chunk
        let bitstream = &still[12..];
        let mut anmf = Vec::new();
        anmf.extend_from_slice(&u24(0)); // x / 2
        anmf.extend_from_slice(&u24(0)); // y / 2
        anmf.extend_from_slice(&u24(width - 1));
        anmf.extend_from_slice(&u24(height - 1));
        anmf.extend_from_slice(&u24(100)); // duration ms
        anmf.push(0x02); // no blending, no disposal
        anmf.extend_from_slice(bitstream);
        body.extend(chunk(b"ANMF", &anmf));
    }

    let mut file = Vec::with_capacity(body.len() + 8);
    file.extend_from_slice(b"RIFF");
    file.extend_from_slice(&(body.len() as u32).to_le_bytes());
    file.extend(body);
    std::fs::write(path, file).unwrap();
}

/// Breaks the `VP8L` signature of the final `ANMF` frame, leaving every chunk
/// size intact so the container still parses.
#[cfg(feature = "webp")]
pub fn corrupt_last_webp_frame(path: &Path) {
    let mut bytes = std::fs::read(path).unwrap();
    let mut offset = 12;
    let mut last_anmf = None;
    while offset + 8 <= bytes.len() {
        let size = u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().unwrap()) as usize;
        if &bytes[offset..offset + 4] == b"ANMF" {
            last_anmf = Some(offset + 8);
        }
        offset += 8 + size + size % 2;
    }
    // 16-byte frame header, then the VP8L chunk header, then the signature
    let payload = last_anmf.unwrap();
    assert_eq!(&bytes[payload + 16..payload + 20], b"VP8L");
    bytes[payload + 24] = 0;
    std::fs::write(path, bytes).unwrap();
}

/// Encodes `num_frames` flat grey MPEG-4 frames into `path`.
pub fn create_test_video(path: &Path, num_frames: usize, width: u32, height: u32, fps: i32) {
    ffmpeg_next::init().unwrap();

    let mut octx = ffmpeg_next::format::output(path).unwrap();

    let global_header = octx
        .format()
        .flags()
        .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

    let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4).unwrap();
    let mut ost = octx.add_stream(Some(codec)).unwrap();

    let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
        .encoder()
        .video()
        .unwrap();

    encoder_ctx.set_width(width);
    encoder_ctx.set_height(height);
    encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
    encoder_ctx.set_time_base(ffmpeg_next::Rational(1, fps));
    encoder_ctx.set_frame_rate(Some(ffmpeg_next::Rational(fps, 1)));

    if global_header {
        encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
    }

    let mut encoder = encoder_ctx
        .open_with(ffmpeg_next::Dictionary::new())
        .unwrap();
    ost.set_parameters(&encoder);

    octx.write_header().unwrap();

    let ost_time_base = octx.stream(0).unwrap().time_base();

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        ffmpeg_next::format::Pixel::RGB24,
        width,
        height,
        ffmpeg_next::format::Pixel::YUV420P,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .unwrap();

    for i in 0..num_frames {
        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
        );
        let stride = rgb_frame.stride(0);
        let data = rgb_frame.data_mut(0);
        let value = ((i * 40) % 256) as u8;
        for row in 0..height as usize {
            let start = row * stride;
            data[start..start + width as usize * 3].fill(value);
        }

        let mut yuv_frame = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&rgb_frame, &mut yuv_frame).unwrap();
        yuv_frame.set_pts(Some(i as i64));

        encoder.send_frame(&yuv_frame).unwrap();

        let mut encoded = ffmpeg_next::Packet::empty();
        while encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(0);
            encoded.rescale_ts(ffmpeg_next::Rational(1, fps), ost_time_base);
            encoded.write_interleaved(&mut octx).unwrap();
        }
    }

    encoder.send_eof().unwrap();
    let mut encoded = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(0);
        encoded.rescale_ts(ffmpeg_next::Rational(1, fps), ost_time_base);
        encoded.write_interleaved(&mut octx).unwrap();
    }

    octx.write_trailer().unwrap();
}
