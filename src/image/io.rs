//! I/O helpers for grayscale images and JSON.
//!
//! This is the only place where grids meet 8-bit pixels:
//! - `load_grayscale_image`: read a PNG/JPEG into an owned 8-bit gray buffer.
//! - `load_grayscale_f32`: same, converted to a grid with values in `[0, 1]`.
//! - `save_grayscale_f32`: write a grid to a grayscale PNG (`×255`, clamped).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        let stride = width;
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Load an image from disk as a grid with intensities in `[0, 1]`.
pub fn load_grayscale_f32(path: &Path) -> Result<ImageF32, String> {
    let gray = load_grayscale_image(path)?;
    Ok(gray.as_view().to_f32_normalized())
}

/// Quantize a grid in `[0, 1]` to 8-bit, rounding and clamping to `[0, 255]`.
pub fn quantize_u8(image: &ImageF32) -> GrayImage {
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).round().clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    quantize_u8(image)
        .save(path)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_out_of_range_values() {
        let img = ImageF32::from_rows(&[[-0.5, 0.5, 1.0, 2.0]]).unwrap();
        let q = quantize_u8(&img);
        assert_eq!(q.into_raw(), vec![0, 128, 255, 255]);
    }

    #[test]
    fn png_round_trip_through_temp_dir() {
        let dir = std::env::temp_dir().join(format!("joint_upsample_io_{}", std::process::id()));
        let path = dir.join("nested").join("ramp.png");
        let img = ImageF32::from_rows(&[[0.0, 1.0], [0.2, 0.4]]).unwrap();
        save_grayscale_f32(&img, &path).unwrap();
        let loaded = load_grayscale_f32(&path).unwrap();
        assert_eq!(loaded, img);
        let _ = fs::remove_dir_all(&dir);
    }
}
