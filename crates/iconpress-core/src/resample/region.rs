//! Axis-aligned rectangles used to partition resampling work.
//!
//! A [`Region`] is half-open: it covers `min_x..max_x` horizontally and
//! `min_y..max_y` vertically. Quadrants are produced by splitting at the
//! integer midpoint of each axis, so odd spans yield halves that differ by
//! one pixel.

/// A half-open rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Region {
    /// Create a region from its corners.
    ///
    /// Corners are normalized so that `min <= max` on both axes.
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// The full bounds of an image with the given dimensions, anchored at the origin.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// True when the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Integer midpoint of the region, `(min + max) / 2` on each axis.
    pub fn midpoint(&self) -> (u32, u32) {
        (
            self.min_x + self.width() / 2,
            self.min_y + self.height() / 2,
        )
    }

    /// Split the region at its midpoint.
    ///
    /// Quadrants are returned in a fixed order: top-left, top-right,
    /// bottom-left, bottom-right. Together they tile the region exactly.
    pub fn quadrants(&self) -> [Region; 4] {
        let (mid_x, mid_y) = self.midpoint();
        [
            Region::new(self.min_x, self.min_y, mid_x, mid_y),
            Region::new(mid_x, self.min_y, self.max_x, mid_y),
            Region::new(self.min_x, mid_y, mid_x, self.max_y),
            Region::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }

    /// Grow any zero-length span to a single pixel, staying inside `bounds`.
    ///
    /// A source that is one pixel wide or tall produces empty quadrants on
    /// that axis. Those quadrants borrow the neighbouring row or column so the
    /// matching destination quadrant still receives pixels. `bounds` must be
    /// non-empty and contain `self`.
    pub(crate) fn widened_within(self, bounds: Region) -> Region {
        let (min_x, max_x) = widen_span(self.min_x, self.max_x, bounds.min_x, bounds.max_x);
        let (min_y, max_y) = widen_span(self.min_y, self.max_y, bounds.min_y, bounds.max_y);
        Region {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

fn widen_span(min: u32, max: u32, lower: u32, upper: u32) -> (u32, u32) {
    if min < max {
        (min, max)
    } else if max < upper {
        (min, max + 1)
    } else {
        (min.saturating_sub(1).max(lower), max)
    }
}
