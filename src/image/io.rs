//! I/O helpers for pixel buffers and JSON reports.
//!
//! - `load_rgb_image`: read a PNG/JPEG into an owned 3-channel buffer.
//! - `save_pixel_buffer`: write a 1- or 3-channel buffer (or an edge map) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, PixelBuffer};
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<PixelBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_raw(width, height, 3, img.into_raw())
        .map_err(|e| format!("Failed to adopt {}: {e}", path.display()))
}

/// Save a 1-channel buffer as grayscale or a 3-channel buffer as RGB.
pub fn save_pixel_buffer(buffer: &PixelBuffer, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (w, h) = (buffer.width() as u32, buffer.height() as u32);
    let packed: Vec<u8> = buffer.rows().flatten().copied().collect();
    let saved = match buffer.channels() {
        1 => GrayImage::from_raw(w, h, packed).map(|img| img.save(path)),
        3 => RgbImage::from_raw(w, h, packed).map(|img| img.save(path)),
        n => return Err(format!("Cannot save {n}-channel buffer to {}", path.display())),
    };
    saved
        .ok_or_else(|| "Failed to create image buffer".to_string())?
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
