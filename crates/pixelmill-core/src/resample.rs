//! Bilinear resampling.

use crate::parallel::{fill_rows, Parallelism};
use crate::raster::{ChannelLayout, PixelSource, RasterImage, Rect};

/// Resize `src` to `width` x `height` with bilinear interpolation.
///
/// Destination pixel (x, y) samples the source at
/// `(x * srcW / width, y * srcH / height)`, a top-left-aligned mapping
/// with no half-pixel center offset, and blends the four surrounding
/// source pixels by their fractional distances. The interpolated 16-bit
/// channels are narrowed by taking the high byte (truncating, not
/// rounding).
///
/// A non-positive target dimension yields the empty image; so does an empty
/// source. Resizing to the source's own dimensions reproduces it exactly,
/// since every sample then lands on an integer source pixel.
///
/// Rows of the destination are computed in parallel; the output is
/// identical for any worker count.
pub fn resize_bilinear<S>(
    src: &S,
    width: i32,
    height: i32,
    parallelism: Parallelism,
) -> RasterImage
where
    S: PixelSource + Sync,
{
    if width <= 0 || height <= 0 {
        return RasterImage::empty();
    }
    let sb = src.bounds();
    let (src_w, src_h) = (sb.width(), sb.height());
    if src_w <= 0 || src_h <= 0 {
        return RasterImage::empty();
    }

    let mut out = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::from_size(width, height));
    let stride = out.row_stride();

    fill_rows(out.pixels_mut(), stride, parallelism, |y, row| {
        let src_y = y as f64 * src_h as f64 / height as f64;
        let y0 = src_y as i32;
        let y1 = (y0 + 1).min(src_h - 1);
        let dy = src_y - y0 as f64;

        for x in 0..width {
            let src_x = x as f64 * src_w as f64 / width as f64;
            let x0 = src_x as i32;
            let x1 = (x0 + 1).min(src_w - 1);
            let dx = src_x - x0 as f64;

            let p00 = src.pixel16(sb.x0 + x0, sb.y0 + y0);
            let p10 = src.pixel16(sb.x0 + x1, sb.y0 + y0);
            let p01 = src.pixel16(sb.x0 + x0, sb.y0 + y1);
            let p11 = src.pixel16(sb.x0 + x1, sb.y0 + y1);

            let base = x as usize * 4;
            for c in 0..4 {
                let v0 = p00[c] as f64 * (1.0 - dx) + p10[c] as f64 * dx;
                let v1 = p01[c] as f64 * (1.0 - dx) + p11[c] as f64 * dx;
                let vf = v0 * (1.0 - dy) + v1 * dy;
                row[base + c] = ((vf as u32) >> 8) as u8;
            }
        }
    });
    out
}
