//! Square resampling for icon frames.
//!
//! This module provides:
//! - [`Region`], the half-open rectangle used to split work into quadrants
//! - [`scale_to_square`], which resamples any RGBA image to a `size x size`
//!   buffer with one worker per quadrant
//!
//! # Concurrency
//!
//! Each call spawns exactly four scoped threads and joins them before
//! returning. Destination quadrants are disjoint mutable slices of the
//! output buffer; the source is shared read-only. On `wasm32` the four
//! quadrants run sequentially on the calling thread.

mod region;
mod scale;

pub use region::Region;
pub use scale::scale_to_square;

use thiserror::Error;

/// Errors that can occur while resampling.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// The source image covers no pixels.
    #[error("Source image is empty: {width}x{height}")]
    EmptySource { width: u32, height: u32 },

    /// The requested square side is zero.
    #[error("Target size must be non-zero")]
    ZeroTarget,
}
