//! Quadrant-parallel Catmull-Rom resampling to a square buffer.
//!
//! Source and destination bounds are both split into four quadrants with
//! [`Region::quadrants`]. Quadrant `i` of the source is resampled into
//! quadrant `i` of the destination, one unit of work per pair. Destination
//! quadrants are handed out as disjoint `&mut` row slices of the output
//! buffer, so the units share nothing mutable.

use super::{Region, ResampleError};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{debug, trace};

const CHANNELS: usize = 4;

/// Mutable view over one destination quadrant: one slice per pixel row.
struct QuadrantMut<'a> {
    region: Region,
    rows: Vec<&'a mut [u8]>,
}

/// Resample `source` to a freshly allocated `size x size` RGBA image.
///
/// Non-square sources are stretched to fill the square. Each quadrant is
/// resampled on its own thread with the Catmull-Rom filter and replaces the
/// transparent destination pixels. The call returns once all four quadrants
/// are done.
///
/// # Errors
///
/// * [`ResampleError::EmptySource`] if the source has zero width or height
/// * [`ResampleError::ZeroTarget`] if `size` is zero
pub fn scale_to_square(source: &RgbaImage, size: u32) -> Result<RgbaImage, ResampleError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ResampleError::EmptySource { width, height });
    }
    if size == 0 {
        return Err(ResampleError::ZeroTarget);
    }

    debug!("Resampling {}x{} source to {}x{}", width, height, size, size);

    let mut out = RgbaImage::new(size, size);
    let source_bounds = Region::from_dimensions(width, height);
    let source_quads = source_bounds.quadrants();
    let dest_quads = quadrants_mut(&mut out);

    dispatch(source, source_bounds, source_quads, dest_quads);

    Ok(out)
}

/// Split an image buffer into its four quadrants as disjoint row slices.
fn quadrants_mut(image: &mut RgbaImage) -> [QuadrantMut<'_>; 4] {
    let (width, height) = image.dimensions();
    let bounds = Region::from_dimensions(width, height);
    let regions = bounds.quadrants();
    let (mid_x, mid_y) = bounds.midpoint();

    let stride = width as usize * CHANNELS;
    let split = mid_x as usize * CHANNELS;

    let raw: &mut [u8] = image;
    let (top, bottom) = raw.split_at_mut(mid_y as usize * stride);

    let mut top_left = Vec::with_capacity(mid_y as usize);
    let mut top_right = Vec::with_capacity(mid_y as usize);
    for row in top.chunks_exact_mut(stride) {
        let (left, right) = row.split_at_mut(split);
        top_left.push(left);
        top_right.push(right);
    }

    let lower_rows = (height - mid_y) as usize;
    let mut bottom_left = Vec::with_capacity(lower_rows);
    let mut bottom_right = Vec::with_capacity(lower_rows);
    for row in bottom.chunks_exact_mut(stride) {
        let (left, right) = row.split_at_mut(split);
        bottom_left.push(left);
        bottom_right.push(right);
    }

    let [tl, tr, bl, br] = regions;
    [
        QuadrantMut {
            region: tl,
            rows: top_left,
        },
        QuadrantMut {
            region: tr,
            rows: top_right,
        },
        QuadrantMut {
            region: bl,
            rows: bottom_left,
        },
        QuadrantMut {
            region: br,
            rows: bottom_right,
        },
    ]
}

/// Run one unit of work per quadrant pair and wait for all of them.
#[cfg(not(target_arch = "wasm32"))]
fn dispatch(
    source: &RgbaImage,
    bounds: Region,
    source_quads: [Region; 4],
    dest_quads: [QuadrantMut<'_>; 4],
) {
    std::thread::scope(|scope| {
        for (index, (src, dst)) in source_quads.into_iter().zip(dest_quads).enumerate() {
            scope.spawn(move || resample_quadrant(index, source, bounds, src, dst));
        }
    });
}

/// wasm32 has no threads; run the same units in quadrant order.
#[cfg(target_arch = "wasm32")]
fn dispatch(
    source: &RgbaImage,
    bounds: Region,
    source_quads: [Region; 4],
    dest_quads: [QuadrantMut<'_>; 4],
) {
    for (index, (src, dst)) in source_quads.into_iter().zip(dest_quads).enumerate() {
        resample_quadrant(index, source, bounds, src, dst);
    }
}

/// Resample one source quadrant into its destination quadrant.
fn resample_quadrant(
    index: usize,
    source: &RgbaImage,
    bounds: Region,
    src: Region,
    dst: QuadrantMut<'_>,
) {
    if dst.region.is_empty() {
        return;
    }

    let src = src.widened_within(bounds);
    trace!("Quadrant {}: {:?} -> {:?}", index, src, dst.region);

    let tile = imageops::crop_imm(source, src.min_x, src.min_y, src.width(), src.height())
        .to_image();
    let scaled = imageops::resize(
        &tile,
        dst.region.width(),
        dst.region.height(),
        FilterType::CatmullRom,
    );

    let line = dst.region.width() as usize * CHANNELS;
    for (row, pixels) in dst.rows.into_iter().zip(scaled.as_raw().chunks_exact(line)) {
        row.copy_from_slice(pixels);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
