//! iconpress core - single-frame ICO encoding
//!
//! This crate turns a decoded image into a Windows icon file holding one
//! PNG-compressed square frame. It covers:
//! - Quadrant-parallel Catmull-Rom resampling to the icon size ([`resample`])
//! - Byte-exact ICO header/entry serialization and the encode pipeline ([`ico`])
//!
//! Supported sizes are 16, 32, 48, 64 and 256 pixels.

pub mod ico;
pub mod resample;

pub use ico::{encode, encode_rgba, encode_to_vec, IcoError, IconSize};
pub use resample::{scale_to_square, ResampleError};
