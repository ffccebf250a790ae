//! PNG output of rendered frames and PNG input of sprites.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! shaders do not pull in the `image` crate. The pixel conversion itself lives
//! in [`crate::pixel`] (always available).

use std::path::Path;

use tessel_core::{EngineError, FrameBuffer};

use crate::composite::Sprite;
use crate::pixel::frame_to_rgba;

/// Writes a frame as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the frame dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(frame: &FrameBuffer, path: &Path) -> Result<(), EngineError> {
    let rgba = frame_to_rgba(frame);
    let w = u32::try_from(frame.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(frame.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    log::debug!("wrote {w}x{h} png to {}", path.display());
    Ok(())
}

/// Reads an image file as an RGBA [`Sprite`] for compositing.
///
/// Returns `EngineError::Io` if the file cannot be opened or decoded.
pub fn load_sprite(path: &Path) -> Result<Sprite, EngineError> {
    let img = image::open(path)
        .map_err(|e| EngineError::Io(e.to_string()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Sprite::new(w as usize, h as usize, img.into_raw())
}
