//! In-memory RGB frames and PNG encoding.
//!
//! Every render call allocates its own frame, draws into it through a
//! `BitMapBackend`, and encodes the result. No buffer or drawing state
//! survives a call.

use crate::error::{ChartError, Result};
use std::io::Cursor;

/// Canvas width of a single chart, in pixels.
pub const WIDTH: u32 = 960;
/// Canvas height of a single chart, in pixels.
pub const HEIGHT: u32 = 720;

/// Allocate a zeroed RGB frame for the given canvas.
pub fn rgb_frame(width: u32, height: u32) -> Vec<u8> {
    vec![0u8; (width as usize) * (height as usize) * 3]
}

/// Encode a drawn RGB frame as PNG bytes.
pub fn encode_png(frame: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, frame)
        .ok_or_else(|| ChartError::drawing("frame buffer does not match canvas size"))?;
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, image::ImageFormat::Png)?;
    Ok(png.into_inner())
}
