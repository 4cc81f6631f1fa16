//! Pluggable per-image filters.
//!
//! A filter is a small capability: it consumes a source image and produces
//! a new one, leaving the source untouched. Filters are selected by value
//! or as trait objects through [`crate::processor::Processor::apply_filter`].

mod grayscale;

pub use grayscale::GrayscaleFilter;

use crate::raster::RasterImage;

/// An image transform that produces a new image from a source image.
pub trait Filter {
    /// Apply the filter to `image`.
    fn apply(&self, image: &RasterImage) -> RasterImage;
}
