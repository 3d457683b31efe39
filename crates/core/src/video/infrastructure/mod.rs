#[cfg(any(feature = "gif", feature = "apng"))]
pub mod animated_image_source;
pub mod ffmpeg_stream_source;
#[cfg(feature = "webp")]
pub mod webp_frame_source;
