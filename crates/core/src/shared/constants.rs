pub const WEBP_EXTENSIONS: &[&str] = &["webp"];
pub const GIF_EXTENSIONS: &[&str] = &["gif"];
pub const APNG_EXTENSIONS: &[&str] = &["png", "apng"];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mpeg", "mpg", "wmv", "asf", "mov", "mkv", "webm", "m4v",
];

/// Default I/O timeout for network streams.
pub const DEFAULT_STREAM_TIMEOUT_MS: u64 = 10_000;

#[cfg(target_os = "linux")]
pub const DEFAULT_DEVICE_FORMAT: &str = "v4l2";
#[cfg(target_os = "macos")]
pub const DEFAULT_DEVICE_FORMAT: &str = "avfoundation";
#[cfg(target_os = "windows")]
pub const DEFAULT_DEVICE_FORMAT: &str = "vfwcap";
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub const DEFAULT_DEVICE_FORMAT: &str = "v4l2";
