//! WASM-compatible wrapper types for image data.

use iconpress_core::ico::IconDirEntry;
use image::RgbaImage;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// Holds the pixel buffer in WASM memory so the same image can be encoded
/// at several sizes without copying it across the boundary each time.
#[wasm_bindgen]
pub struct JsRgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRgbaImage {
    /// Create a new JsRgbaImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRgbaImage {
        JsRgbaImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }
}

impl JsRgbaImage {
    /// Copy the pixels into a core image buffer.
    ///
    /// Returns an error message if the buffer length is not `width * height * 4`.
    pub(crate) fn to_rgba_image(&self) -> Result<RgbaImage, String> {
        rgba_from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// Build an `RgbaImage` from raw pixels, checking the buffer length.
pub(crate) fn rgba_from_raw(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<RgbaImage, String> {
    let expected = (width as usize) * (height as usize) * 4;
    let invalid = |actual: usize| {
        format!(
            "Invalid pixel data: expected {} bytes (width * height * 4), got {}",
            expected, actual
        )
    };

    if pixels.len() != expected {
        return Err(invalid(pixels.len()));
    }
    let actual = pixels.len();
    RgbaImage::from_raw(width, height, pixels).ok_or_else(|| invalid(actual))
}

/// Summary of a single-frame icon's directory entry.
#[wasm_bindgen]
pub struct JsIconInfo {
    width: u32,
    height: u32,
    data_size: u32,
    data_offset: u32,
}

#[wasm_bindgen]
impl JsIconInfo {
    /// Width in pixels (256 for a stored 0)
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (256 for a stored 0)
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of the embedded PNG in bytes
    #[wasm_bindgen(getter)]
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Byte position of the embedded PNG
    #[wasm_bindgen(getter)]
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }
}

impl From<IconDirEntry> for JsIconInfo {
    fn from(entry: IconDirEntry) -> Self {
        Self {
            width: entry.width_pixels(),
            height: entry.height_pixels(),
            data_size: entry.data_size,
            data_offset: entry.data_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_rgba_image_creation() {
        let img = JsRgbaImage::new(10, 5, vec![0u8; 10 * 5 * 4]);
        assert_eq!(img.width(), 10);
        assert_eq!(img.height(), 5);
        assert_eq!(img.byte_length(), 200);
    }

    #[test]
    fn test_to_rgba_image() {
        let img = JsRgbaImage::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let rgba = img.to_rgba_image().unwrap();
        assert_eq!(rgba.dimensions(), (2, 1));
        assert_eq!(rgba.get_pixel(1, 0).0, [5, 6, 7, 8]);
    }

    #[test]
    fn test_to_rgba_image_wrong_length() {
        let img = JsRgbaImage::new(4, 4, vec![0u8; 4 * 4 * 3]);
        let err = img.to_rgba_image().unwrap_err();
        assert_eq!(
            err,
            "Invalid pixel data: expected 64 bytes (width * height * 4), got 48"
        );
    }

    #[test]
    fn test_rgba_from_raw_rejects_oversized_buffer() {
        assert!(rgba_from_raw(2, 2, vec![0u8; 20]).is_err());
    }

    #[test]
    fn test_icon_info_from_entry() {
        let entry = IconDirEntry::png(256, 256, 1000).unwrap();
        let info = JsIconInfo::from(entry);
        assert_eq!(info.width(), 256);
        assert_eq!(info.height(), 256);
        assert_eq!(info.data_size(), 1000);
        assert_eq!(info.data_offset(), 22);
    }
}
