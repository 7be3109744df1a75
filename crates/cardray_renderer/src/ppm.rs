//! Binary PPM (P6) output.
//!
//! The file is the 15-byte header `"P6 512 512 255 "` followed by one RGB
//! byte triplet per pixel, in [`ImageBuffer::scan_order`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::{ImageBuffer, IMAGE_HEIGHT, IMAGE_WIDTH};

/// Exact header bytes. Note the single trailing space and no newline.
pub const PPM_HEADER: &[u8; 15] = b"P6 512 512 255 ";

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum PpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

pub type PpmResult<T> = Result<T, PpmError>;

/// Narrow an accumulated channel value to an output byte.
///
/// Truncates toward zero to a 32-bit integer, then keeps the low 8 bits,
/// so values past 255 wrap rather than clamp (300.7 -> 44, -3.5 -> 253).
#[inline]
pub fn channel_to_byte(value: f64) -> u8 {
    value as i32 as u8
}

/// Convert a color to its RGB output bytes.
pub fn color_to_rgb(color: cardray_math::Color) -> [u8; 3] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
    ]
}

/// Serialize `image` as P6 into `writer`.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> PpmResult<()> {
    if image.width != IMAGE_WIDTH || image.height != IMAGE_HEIGHT {
        return Err(PpmError::SizeMismatch {
            expected_width: IMAGE_WIDTH,
            expected_height: IMAGE_HEIGHT,
            actual_width: image.width,
            actual_height: image.height,
        });
    }

    writer.write_all(PPM_HEADER)?;
    for color in image.scanlines() {
        writer.write_all(&color_to_rgb(color))?;
    }
    writer.flush()?;

    Ok(())
}

/// Write `image` to a file at `path`, replacing any existing file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> PpmResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))?;

    log::info!("Saved {}", path.display());
    Ok(())
}
