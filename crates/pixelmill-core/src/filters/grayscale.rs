//! Grayscale conversion using fixed-point ITU-R luma weights.

use super::Filter;
use crate::parallel::{fill_rows, Parallelism};
use crate::raster::{ChannelLayout, PixelSource, RasterImage};

/// Fixed-point luma weight for the red channel (19595 / 65536 ~ 0.299).
const LUMA_R: u32 = 19595;

/// Fixed-point luma weight for the green channel (~ 0.587).
const LUMA_G: u32 = 38470;

/// Fixed-point luma weight for the blue channel (~ 0.114).
const LUMA_B: u32 = 7471;

/// Rounding bias added before the 16-bit shift.
const LUMA_BIAS: u32 = 1 << 15;

/// Weighted 16-bit luma of a 16-bit RGBA pixel. Alpha is ignored.
#[inline]
pub(crate) fn luma16(px: [u16; 4]) -> u16 {
    let [r, g, b, _] = px;
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_BIAS) >> 16) as u16
}

/// Converts an image to 8-bit grayscale.
///
/// The output keeps the source bounds (origin offset included) and stores
/// one luma byte per pixel; alpha is discarded. The weights sum to exactly
/// 2^16, so pure black maps to 0 and pure white to 255.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleFilter {
    parallelism: Parallelism,
}

impl GrayscaleFilter {
    /// Create a filter using every available core.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with a pinned worker count.
    pub fn with_parallelism(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Convert any pixel source to grayscale.
    pub fn grayscale<S: PixelSource + Sync>(&self, src: &S) -> RasterImage {
        let bounds = src.bounds();
        let mut out = RasterImage::zeroed(ChannelLayout::Gray8, bounds);
        let stride = out.row_stride();
        let width = bounds.width();

        fill_rows(out.pixels_mut(), stride, self.parallelism, |y, row| {
            let ay = bounds.y0 + y as i32;
            for x in 0..width {
                let px = src.pixel16(bounds.x0 + x, ay);
                row[x as usize] = (luma16(px) >> 8) as u8;
            }
        });
        out
    }
}

impl Filter for GrayscaleFilter {
    fn apply(&self, image: &RasterImage) -> RasterImage {
        self.grayscale(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rect;

    fn solid(color: [u8; 4], width: i32, height: i32) -> RasterImage {
        let mut img = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::from_size(width, height));
        for px in img.pixels_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        img
    }

    #[test]
    fn test_black_maps_to_zero() {
        let img = solid([0, 0, 0, 255], 10, 10);
        let gray = GrayscaleFilter::new().grayscale(&img);
        assert!(gray.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_white_maps_to_full() {
        let img = solid([255, 255, 255, 255], 10, 10);
        let gray = GrayscaleFilter::new().grayscale(&img);
        assert!(gray.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_pure_red_luma() {
        // (0xFFFF * 19595 + 0x8000) >> 16 = 19594; high byte = 76.
        let img = solid([255, 0, 0, 255], 4, 4);
        let gray = GrayscaleFilter::new().grayscale(&img);
        assert!(gray.pixels().iter().all(|&b| b == 76));
    }

    #[test]
    fn test_alpha_is_discarded() {
        let opaque = GrayscaleFilter::new().grayscale(&solid([40, 80, 120, 255], 3, 3));
        let clear = GrayscaleFilter::new().grayscale(&solid([40, 80, 120, 0], 3, 3));
        assert_eq!(opaque.pixels(), clear.pixels());
    }

    #[test]
    fn test_bounds_preserved() {
        let src = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::new(5, 5, 15, 15));
        let gray = GrayscaleFilter::new().grayscale(&src);
        assert_eq!(gray.bounds(), src.bounds());
        assert_eq!(gray.layout(), ChannelLayout::Gray8);
    }

    #[test]
    fn test_empty_input() {
        let gray = GrayscaleFilter::new().grayscale(&RasterImage::empty());
        assert!(gray.is_empty());
    }

    #[test]
    fn test_worker_count_invariance() {
        let mut src = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::from_size(9, 9));
        for (i, b) in src.pixels_mut().iter_mut().enumerate() {
            *b = (i * 7 % 251) as u8;
        }

        let one = GrayscaleFilter::with_parallelism(Parallelism::Fixed(1)).grayscale(&src);
        let many = GrayscaleFilter::with_parallelism(Parallelism::Fixed(64)).grayscale(&src);
        assert_eq!(one, many);
    }

    #[test]
    fn test_apply_through_filter_trait() {
        let filter: &dyn Filter = &GrayscaleFilter::new();
        let out = filter.apply(&solid([255, 255, 255, 255], 2, 2));
        assert_eq!(out.pixels(), &[255, 255, 255, 255]);
    }
}
