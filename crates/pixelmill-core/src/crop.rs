//! Rectangular crop extraction.

use crate::raster::{RasterImage, Rect};

/// Copy the part of `src` covered by `rect`.
///
/// `rect` is given in the source's absolute coordinates and is intersected
/// with the source bounds first; an empty intersection produces an empty
/// image. The copy is verbatim: the output keeps the source's channel
/// layout and is re-rooted at origin (0, 0). Rows are copied as whole
/// byte runs; no per-pixel work is involved.
pub fn crop(src: &RasterImage, rect: Rect) -> RasterImage {
    let r = rect.intersect(src.bounds());
    if r.is_empty() {
        return RasterImage::empty();
    }

    let mut out = RasterImage::zeroed(src.layout(), Rect::from_size(r.width(), r.height()));
    let bpp = src.layout().bytes_per_pixel();
    let src_stride = src.row_stride();
    let dst_stride = out.row_stride();
    let sb = src.bounds();
    let x_off = (r.x0 - sb.x0) as usize * bpp;
    let top = (r.y0 - sb.y0) as usize;

    let src_pixels = src.pixels();
    let dst_pixels = out.pixels_mut();
    for y in 0..r.height() as usize {
        let src_row = (top + y) * src_stride + x_off;
        let dst_row = y * dst_stride;
        dst_pixels[dst_row..dst_row + dst_stride]
            .copy_from_slice(&src_pixels[src_row..src_row + dst_stride]);
    }
    out
}
