use std::fmt;

/// Arrangement of the color components inside a packed 3-channel pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// The order every source hands frames out in.
///
/// Matches what libswscale produces for `BGR24`, so stream frames need no
/// conversion at all.
pub const CANONICAL_ORDER: ChannelOrder = ChannelOrder::Bgr;

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Rgb => write!(f, "RGB"),
            ChannelOrder::Bgr => write!(f, "BGR"),
        }
    }
}

/// Swaps the first and third component of every packed 3-byte pixel.
///
/// The conversion is its own inverse, so it serves RGB→BGR and BGR→RGB alike.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

/// Packs an interleaved buffer with `bytes_per_pixel` components into RGB,
/// dropping any trailing components (alpha).
///
/// Buffers that are already 3 bytes per pixel are returned unchanged.
pub fn pack_rgb(pixels: Vec<u8>, bytes_per_pixel: usize) -> Vec<u8> {
    if bytes_per_pixel == 3 {
        return pixels;
    }
    let mut rgb = Vec::with_capacity(pixels.len() / bytes_per_pixel * 3);
    for px in pixels.chunks_exact(bytes_per_pixel) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}
