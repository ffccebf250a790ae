//! ASCII PPM (P3) output for inspecting rendered frames.
//!
//! Layout: `P3\n{width} {height}\n255\n`, then one line per row, top to
//! bottom, each pixel written as `R G B ` (every channel followed by a
//! space) with channel = `floor(clamp01(c) * 255)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::color::unit_to_byte;
use crate::error::EngineError;
use crate::frame::FrameBuffer;

/// Writes `frame` as P3 text to any writer.
pub fn write_ppm<W: Write>(frame: &FrameBuffer, mut out: W) -> std::io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", frame.width(), frame.height())?;
    for row in frame.data().chunks_exact(frame.width()) {
        for c in row {
            write!(
                out,
                "{} {} {} ",
                unit_to_byte(c.x),
                unit_to_byte(c.y),
                unit_to_byte(c.z)
            )?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Writes `frame` as a P3 file at `path`.
///
/// Returns `EngineError::Io` if the file cannot be created or written.
pub fn save_ppm(frame: &FrameBuffer, path: &Path) -> Result<(), EngineError> {
    let file = File::create(path)?;
    write_ppm(frame, BufWriter::new(file))?;
    log::debug!("wrote {}x{} ppm to {}", frame.width(), frame.height(), path.display());
    Ok(())
}
