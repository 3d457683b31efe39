//! Uniform frame reading over animated images, video files, capture devices
//! and network streams.
//!
//! [`open`] classifies a descriptor and returns a boxed [`FrameSource`]
//! yielding packed 3-channel BGR [`Frame`]s.

pub mod dispatch;
pub mod shared;
pub mod video;

#[cfg(test)]
mod test_support;

pub use dispatch::{classify, open, open_with};
pub use shared::error::CaptureError;
pub use shared::frame::Frame;
pub use shared::open_options::OpenOptions;
pub use video::domain::frame_source::FrameSource;
pub use video::domain::source_kind::{AnimatedFormat, SourceKind, StreamTarget};
