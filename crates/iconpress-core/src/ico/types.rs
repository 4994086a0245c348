//! Core types for ICO encoding.

use super::LayoutError;
use crate::resample::ResampleError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for ICO encoding operations.
#[derive(Debug, Error)]
pub enum IcoError {
    /// The requested icon size is not one of the supported sizes.
    #[error("Unsupported icon size {0}: expected one of 16, 32, 48, 64, 256")]
    UnsupportedSize(u32),

    /// The source image could not be resampled.
    #[error("Resampling failed: {0}")]
    ResamplingFailed(#[from] ResampleError),

    /// The PNG codec rejected the resampled buffer.
    #[error("PNG compression failed: {0}")]
    CompressionFailed(#[source] image::ImageError),

    /// The header or directory entry could not be serialized.
    #[error("Icon layout encoding failed: {0}")]
    LayoutEncodingFailed(#[from] LayoutError),

    /// The output sink failed while writing.
    #[error(transparent)]
    Io(std::io::Error),
}

/// Square icon sizes that can be encoded.
///
/// Serialized as the bare pixel count, so `32` in a config file maps to
/// [`IconSize::X32`]. Unsupported integers fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(u32)]
pub enum IconSize {
    /// 16x16, small list views and favicons.
    X16 = 16,
    /// 32x32, the default desktop icon.
    X32 = 32,
    /// 48x48
    X48 = 48,
    /// 64x64
    X64 = 64,
    /// 256x256, stored with a width/height byte of 0.
    X256 = 256,
}

impl IconSize {
    /// All supported sizes, smallest first.
    pub const ALL: [IconSize; 5] = [
        IconSize::X16,
        IconSize::X32,
        IconSize::X48,
        IconSize::X64,
        IconSize::X256,
    ];

    /// Side length in pixels.
    pub fn pixels(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for IconSize {
    type Error = IcoError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(IconSize::X16),
            32 => Ok(IconSize::X32),
            48 => Ok(IconSize::X48),
            64 => Ok(IconSize::X64),
            256 => Ok(IconSize::X256),
            other => Err(IcoError::UnsupportedSize(other)),
        }
    }
}

impl From<IconSize> for u32 {
    fn from(size: IconSize) -> Self {
        size.pixels()
    }
}
