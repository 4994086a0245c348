//! ICO encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_ico`] - Encode RGBA pixel data as a single-frame icon
//! - [`encode_ico_from_image`] - Encode a JsRgbaImage as a single-frame icon
//! - [`inspect_ico`] - Read back the directory entry of an encoded icon
//! - [`supported_sizes`] - List the icon sizes the encoder accepts
//!
//! # Example
//!
//! ```typescript
//! import { encode_ico_from_image, JsRgbaImage } from '@iconpress/wasm';
//!
//! const image = new JsRgbaImage(width, height, pixels);
//! const favicon = encode_ico_from_image(image, 32);
//! const desktop = encode_ico_from_image(image, 256);
//! ```

use crate::types::{rgba_from_raw, JsIconInfo, JsRgbaImage};
use iconpress_core::ico::{self, IconSize};
use image::RgbaImage;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data as an ICO file.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `size` - Icon side length: 16, 32, 48, 64 or 256
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match width * height * 4,
/// the image is empty, or `size` is not supported.
#[wasm_bindgen]
pub fn encode_ico(pixels: &[u8], width: u32, height: u32, size: u32) -> Result<Vec<u8>, JsValue> {
    let image =
        rgba_from_raw(width, height, pixels.to_vec()).map_err(|e| JsValue::from_str(&e))?;
    encode_rgba_to_vec(&image, size).map_err(|e| JsValue::from_str(&e))
}

/// Encode a JsRgbaImage as an ICO file.
#[wasm_bindgen]
pub fn encode_ico_from_image(image: &JsRgbaImage, size: u32) -> Result<Vec<u8>, JsValue> {
    let rgba = image.to_rgba_image().map_err(|e| JsValue::from_str(&e))?;
    encode_rgba_to_vec(&rgba, size).map_err(|e| JsValue::from_str(&e))
}

/// Read the directory entry of a single-frame icon produced by this module.
#[wasm_bindgen]
pub fn inspect_ico(bytes: &[u8]) -> Result<JsIconInfo, JsValue> {
    let (_, entry) = ico::read_layout(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsIconInfo::from(entry))
}

/// Icon sizes accepted by the encode functions, smallest first.
#[wasm_bindgen]
pub fn supported_sizes() -> Vec<u32> {
    IconSize::ALL.iter().map(|size| size.pixels()).collect()
}

/// Shared by the bindings; errors are already rendered for JavaScript.
fn encode_rgba_to_vec(image: &RgbaImage, size: u32) -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    ico::encode_rgba(&mut buffer, image, size).map_err(|e| e.to_string())?;
    Ok(buffer)
}
