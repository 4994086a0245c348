//! iconpress WASM - WebAssembly bindings for iconpress
//!
//! This crate exposes the iconpress-core ICO encoder to JavaScript/TypeScript
//! applications. Images cross the boundary as raw RGBA pixels; decoding is
//! left to the browser (canvas `getImageData`, `createImageBitmap`, etc.).
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data and icon info
//! - `encode` - ICO encoding and inspection bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_ico } from '@iconpress/wasm';
//!
//! await init();
//!
//! const { data, width, height } = ctx.getImageData(0, 0, w, h);
//! const ico = encode_ico(new Uint8Array(data.buffer), width, height, 32);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

pub use encode::{encode_ico, encode_ico_from_image, inspect_ico, supported_sizes};
pub use types::{JsIconInfo, JsRgbaImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
