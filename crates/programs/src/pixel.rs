//! Pure-computation pixel buffer conversion from a [`FrameBuffer`].
//!
//! Always available (no feature gate) so callers without the `png` feature
//! can still hand RGBA bytes to their own encoder or display surface.

use tessel_core::color::unit_to_byte;
use tessel_core::FrameBuffer;

/// Quantizes a frame to an RGBA8 buffer.
///
/// Each channel is `floor(clamp01(c) * 255)`, matching the PPM writer, and
/// alpha is always 255. The buffer length is `width * height * 4`.
pub fn frame_to_rgba(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .data()
        .iter()
        .flat_map(|c| [unit_to_byte(c.x), unit_to_byte(c.y), unit_to_byte(c.z), 255u8])
        .collect()
}
