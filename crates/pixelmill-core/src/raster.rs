//! Core raster types: rectangles, pixel buffers, and the readable-pixel
//! capability.
//!
//! Every transform in this crate consumes pixels through the [`PixelSource`]
//! trait and produces a new [`RasterImage`]; source buffers are never
//! mutated. Images carry an origin offset, so a crop or a decoded tile can
//! keep its absolute coordinates without copying into a zero-based frame.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in absolute pixel coordinates.
///
/// `(x0, y0)` is the inclusive top-left corner and `(x1, y1)` the exclusive
/// bottom-right corner. A rectangle with `x1 <= x0` or `y1 <= y0` contains
/// no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a `width` x `height` rectangle rooted at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels; never negative.
    pub fn width(&self) -> i32 {
        (self.x1 - self.x0).max(0)
    }

    /// Height in pixels; never negative.
    pub fn height(&self) -> i32 {
        (self.y1 - self.y0).max(0)
    }

    /// True if the rectangle contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// True if the absolute coordinate (x, y) lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// The largest rectangle contained in both `self` and `other`.
    ///
    /// Returns the zero rectangle when the two do not overlap.
    pub fn intersect(&self, other: Rect) -> Rect {
        let r = Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}

/// Memory layout of a raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// 8-bit RGBA, four bytes per pixel.
    #[default]
    Rgba8,
    /// 8-bit grayscale, one byte per pixel.
    Gray8,
}

impl ChannelLayout {
    /// Number of bytes each pixel occupies.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelLayout::Rgba8 => 4,
            ChannelLayout::Gray8 => 1,
        }
    }
}

/// Read access to pixels in a uniform 16-bit-per-channel RGBA form.
///
/// 8-bit channels expand as `c * 257`, replicating the byte into the high
/// and low halves so that 0xFF maps to 0xFFFF. Grayscale sources replicate
/// luma across R, G, and B and report opaque alpha. Coordinates are
/// absolute: implementations with a non-zero origin translate internally.
pub trait PixelSource {
    /// Bounding rectangle of the addressable pixels.
    fn bounds(&self) -> Rect;

    /// The pixel at absolute coordinate (x, y) as 16-bit RGBA.
    fn pixel16(&self, x: i32, y: i32) -> [u16; 4];
}

/// A dense row-major pixel buffer with absolute-coordinate bounds.
///
/// The buffer length always equals `width * height * bytes_per_pixel`.
/// Transforms allocate a fresh image for their output and never write to an
/// image after handing it out.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    bounds: Rect,
    layout: ChannelLayout,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image from an existing buffer.
    pub fn new(layout: ChannelLayout, bounds: Rect, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            bounds.width() as usize * bounds.height() as usize * layout.bytes_per_pixel(),
            "Pixel buffer size mismatch"
        );
        Self {
            bounds,
            layout,
            pixels,
        }
    }

    /// Allocate a zero-filled image covering `bounds`.
    pub fn zeroed(layout: ChannelLayout, bounds: Rect) -> Self {
        let len = bounds.width() as usize * bounds.height() as usize * layout.bytes_per_pixel();
        Self {
            bounds,
            layout,
            pixels: vec![0; len],
        }
    }

    /// The canonical empty (0x0) image.
    pub fn empty() -> Self {
        Self::zeroed(ChannelLayout::Rgba8, Rect::default())
    }

    /// Materialize any pixel source as an RGBA image with the same bounds.
    ///
    /// Channels are narrowed from the 16-bit read form by taking the high
    /// byte.
    pub fn from_source<S: PixelSource + ?Sized>(src: &S) -> Self {
        let bounds = src.bounds();
        let mut out = Self::zeroed(ChannelLayout::Rgba8, bounds);
        let width = bounds.width() as usize;
        for y in 0..bounds.height() {
            for x in 0..bounds.width() {
                let px = src.pixel16(bounds.x0 + x, bounds.y0 + y);
                let i = (y as usize * width + x as usize) * 4;
                out.pixels[i..i + 4].copy_from_slice(&px.map(|c| (c >> 8) as u8));
            }
        }
        out
    }

    /// Bounding rectangle, including the origin offset.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Channel layout of the buffer.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// True if the image contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Number of bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width() as usize * self.layout.bytes_per_pixel()
    }

    /// The raw pixel buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// The bytes of the pixel at absolute coordinate (x, y).
    pub fn pixel_bytes(&self, x: i32, y: i32) -> &[u8] {
        let bpp = self.layout.bytes_per_pixel();
        let i = self.offset_of(x, y);
        &self.pixels[i..i + bpp]
    }

    fn offset_of(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.bounds.contains(x, y),
            "coordinate ({}, {}) outside bounds {:?}",
            x,
            y,
            self.bounds
        );
        let lx = (x - self.bounds.x0) as usize;
        let ly = (y - self.bounds.y0) as usize;
        (ly * self.width() as usize + lx) * self.layout.bytes_per_pixel()
    }

    /// Convert to an `image::RgbaImage`, discarding the origin offset.
    ///
    /// Returns `None` for grayscale buffers.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        match self.layout {
            ChannelLayout::Rgba8 => image::RgbaImage::from_raw(
                self.width() as u32,
                self.height() as u32,
                self.pixels.clone(),
            ),
            ChannelLayout::Gray8 => None,
        }
    }

    /// Convert to an `image::GrayImage`, discarding the origin offset.
    ///
    /// Returns `None` for RGBA buffers.
    pub fn to_gray_image(&self) -> Option<image::GrayImage> {
        match self.layout {
            ChannelLayout::Gray8 => image::GrayImage::from_raw(
                self.width() as u32,
                self.height() as u32,
                self.pixels.clone(),
            ),
            ChannelLayout::Rgba8 => None,
        }
    }
}

impl PixelSource for RasterImage {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn pixel16(&self, x: i32, y: i32) -> [u16; 4] {
        let px = self.pixel_bytes(x, y);
        match self.layout {
            ChannelLayout::Rgba8 => [
                px[0] as u16 * 257,
                px[1] as u16 * 257,
                px[2] as u16 * 257,
                px[3] as u16 * 257,
            ],
            ChannelLayout::Gray8 => {
                let y16 = px[0] as u16 * 257;
                [y16, y16, y16, u16::MAX]
            }
        }
    }
}

/// Decoder interop: any RGBA buffer from the `image` crate reads directly
/// as a pixel source rooted at the origin.
impl PixelSource for image::RgbaImage {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width() as i32, self.height() as i32)
    }

    fn pixel16(&self, x: i32, y: i32) -> [u16; 4] {
        let p = self.get_pixel(x as u32, y as u32).0;
        [
            p[0] as u16 * 257,
            p[1] as u16 * 257,
            p[2] as u16 * 257,
            p[3] as u16 * 257,
        ]
    }
}

impl From<image::RgbaImage> for RasterImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(
            ChannelLayout::Rgba8,
            Rect::from_size(width as i32, height as i32),
            img.into_raw(),
        )
    }
}
