use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::channel_order::{self, ChannelOrder, CANONICAL_ORDER};

/// A single decoded frame: contiguous 8-bit samples in row-major order.
///
/// Every frame handed out by a [`FrameSource`](crate::video::domain::frame_source::FrameSource)
/// has three channels in [`CANONICAL_ORDER`]. Sources may hold frames in a
/// different order internally and normalize them on the way out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    channel_order: ChannelOrder,
    index: usize,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channel_order: ChannelOrder,
        index: usize,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            channels: 3,
            channel_order,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Position of this frame within the pass that produced it.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Converts the frame to `order`, swapping red and blue in place if needed.
    pub fn into_order(mut self, order: ChannelOrder) -> Self {
        if self.channel_order != order {
            channel_order::swap_red_blue(&mut self.data);
            self.channel_order = order;
        }
        self
    }

    /// Shorthand for `into_order(CANONICAL_ORDER)`.
    pub fn into_canonical(self) -> Self {
        self.into_order(CANONICAL_ORDER)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
