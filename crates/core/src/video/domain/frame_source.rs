use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;

/// Pull-based reader over any frame producer.
///
/// Implementations own their decoder and file or device handle, release it on
/// drop, and hand out frames with three channels in
/// [`CANONICAL_ORDER`](crate::shared::channel_order::CANONICAL_ORDER).
pub trait FrameSource {
    /// Decodes and returns the next frame, or `None` once the current pass is
    /// exhausted. Exhaustion is sticky until [`restart`](Self::restart).
    fn read(&mut self) -> Option<Frame>;

    /// Total number of frames, when the source knows it.
    ///
    /// Live devices and network streams return `None`; never use this to
    /// decide when to stop reading.
    fn length(&mut self) -> Option<usize>;

    /// Rewinds to the first frame.
    fn restart(&mut self) -> Result<(), CaptureError>;

    /// Iterates the remainder of the current pass.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Frame> + '_> {
        Box::new(std::iter::from_fn(move || self.read()))
    }
}
