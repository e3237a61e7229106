//! Image decode/encode, delegated to the `image` crate
//!
//! Every decoded image is converted to 8-bit RGBA on the way in, whatever its
//! source color type.

use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use crate::buffer::PixelBuffer;
use crate::error::{Result, WorkbenchError};

/// A file type the front-end offers in its open/save dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedFormat {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const SUPPORTED_FORMATS: &[SupportedFormat] = &[
    SupportedFormat { name: "PNG image", extensions: &["png"] },
    SupportedFormat { name: "JPEG image", extensions: &["jpg", "jpeg"] },
    SupportedFormat { name: "BMP image", extensions: &["bmp"] },
    SupportedFormat { name: "TIFF image", extensions: &["tif", "tiff"] },
];

/// Whether the path's extension is one of [`SUPPORTED_FORMATS`] (case-insensitive)
pub fn is_supported(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_FORMATS
        .iter()
        .any(|format| format.extensions.contains(&ext.as_str()))
}

/// Load an image from disk into memory
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| WorkbenchError::Processing(format!("Failed to load {}: {}", path.display(), e)))?;
    Ok(PixelBuffer::from(img.to_rgba8()))
}

/// Decode an in-memory encoded image (format guessed from its header)
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(bytes)?;
    Ok(PixelBuffer::from(img.to_rgba8()))
}

/// Save a buffer to disk; the format follows the file extension
pub fn save_image(buf: &PixelBuffer, path: &Path) -> Result<()> {
    if !is_supported(path) {
        return Err(WorkbenchError::InvalidParameter(format!(
            "Unsupported output format: {}",
            path.display()
        )));
    }

    // Ensure output directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let img = buf.to_rgba_image();
    if is_jpeg(path) {
        // JPEG has no alpha channel
        image::DynamicImage::ImageRgba8(img).to_rgb8().save(path)?;
    } else {
        img.save(path)?;
    }
    Ok(())
}

fn is_jpeg(path: &Path) -> bool {
    matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Jpeg)
    )
}

/// Encode as PNG bytes (for preview/transfer without file I/O)
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    buf.to_rgba_image()
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| WorkbenchError::Processing(format!("Failed to encode PNG: {}", e)))?;
    Ok(cursor.into_inner())
}
