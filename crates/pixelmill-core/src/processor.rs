//! Processing strategies: the `Processor` seam and its default
//! implementation.
//!
//! `Processor` bundles the core operations behind one swappable interface
//! so callers can substitute an alternative engine (or a test double)
//! without touching call sites.

use crate::crop;
use crate::filters::Filter;
use crate::parallel::Parallelism;
use crate::raster::{RasterImage, Rect};
use crate::resample::resize_bilinear;

/// Core image operations, pluggable as a strategy.
pub trait Processor {
    /// Scale the image to the given dimensions.
    fn resize(&self, image: &RasterImage, width: i32, height: i32) -> RasterImage;

    /// Extract a rectangular sub-image.
    fn crop(&self, image: &RasterImage, rect: Rect) -> RasterImage;

    /// Apply a filter to the image.
    fn apply_filter(&self, image: &RasterImage, filter: &dyn Filter) -> RasterImage;
}

/// Default processor backed by the row-parallel engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessor {
    parallelism: Parallelism,
}

impl DefaultProcessor {
    /// Create a processor using every available core.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with a pinned worker count.
    pub fn with_parallelism(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }
}

impl Processor for DefaultProcessor {
    fn resize(&self, image: &RasterImage, width: i32, height: i32) -> RasterImage {
        resize_bilinear(image, width, height, self.parallelism)
    }

    fn crop(&self, image: &RasterImage, rect: Rect) -> RasterImage {
        crop::crop(image, rect)
    }

    fn apply_filter(&self, image: &RasterImage, filter: &dyn Filter) -> RasterImage {
        filter.apply(image)
    }
}
