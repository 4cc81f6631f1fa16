//! File loading and saving with extension dispatch.
//!
//! Decoding standard raster formats is delegated to the `image` crate; the
//! decoded pixels are normalized to RGBA and rooted at origin (0, 0).
//! Saving picks a codec from the file extension, with `.webp` going through
//! this crate's own lossless encoder.

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::encode::{encode_webp_lossless, EncodeError};
use crate::raster::{ChannelLayout, RasterImage};

/// Errors surfaced by the I/O layer.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be opened, read, or written.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The `image` crate failed to decode or encode.
    #[error("codec failure: {0}")]
    Image(#[from] image::ImageError),

    /// WebP encoding failed.
    #[error("webp encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The file extension does not map to a supported codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The pixel buffer does not match the image dimensions.
    #[error("pixel buffer does not match image dimensions")]
    InvalidBuffer,
}

/// Read and decode an image file.
///
/// The format is detected from the file contents, not the extension.
/// Returns the decoded image together with the detected format.
pub fn load(path: impl AsRef<Path>) -> Result<(RasterImage, ImageFormat), IoError> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| IoError::UnsupportedFormat("unrecognized contents".to_string()))?;
    let decoded = reader.decode()?;
    Ok((RasterImage::from(decoded.into_rgba8()), format))
}

/// Encode and write an image file, choosing the codec from the extension.
///
/// `.png`, `.gif`, and `.bmp` go through the `image` crate's encoders;
/// `.jpg`/`.jpeg` drops alpha first since JPEG has no alpha channel;
/// `.webp` uses this crate's lossless encoder and therefore accepts
/// solid-color images only.
pub fn save(path: impl AsRef<Path>, image: &RasterImage) -> Result<(), IoError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => to_dynamic(image)?.save_with_format(path, ImageFormat::Png)?,
        "gif" => to_dynamic(image)?.save_with_format(path, ImageFormat::Gif)?,
        "bmp" => to_dynamic(image)?.save_with_format(path, ImageFormat::Bmp)?,
        "jpg" | "jpeg" => {
            let rgb = to_dynamic(image)?.into_rgb8();
            DynamicImage::ImageRgb8(rgb).save_with_format(path, ImageFormat::Jpeg)?;
        }
        "webp" => fs::write(path, encode_webp_lossless(image)?)?,
        _ => return Err(IoError::UnsupportedFormat(ext)),
    }
    Ok(())
}

fn to_dynamic(image: &RasterImage) -> Result<DynamicImage, IoError> {
    match image.layout() {
        ChannelLayout::Rgba8 => image.to_rgba_image().map(DynamicImage::ImageRgba8),
        ChannelLayout::Gray8 => image.to_gray_image().map(DynamicImage::ImageLuma8),
    }
    .ok_or(IoError::InvalidBuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rect;
    use std::path::PathBuf;

    /// Temp-file path that cleans itself up on drop.
    struct TempPath(PathBuf);

    impl TempPath {
        fn new(name: &str) -> Self {
            Self(std::env::temp_dir().join(format!("pixelmill-io-{}-{}", std::process::id(), name)))
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn gradient(width: i32, height: i32) -> RasterImage {
        let mut img = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::from_size(width, height));
        for (i, b) in img.pixels_mut().iter_mut().enumerate() {
            *b = if i % 4 == 3 { 255 } else { (i % 256) as u8 };
        }
        img
    }

    fn solid(color: [u8; 4], width: i32, height: i32) -> RasterImage {
        let mut img = RasterImage::zeroed(ChannelLayout::Rgba8, Rect::from_size(width, height));
        for px in img.pixels_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        img
    }

    #[test]
    fn test_png_round_trip() {
        let path = TempPath::new("round.png");
        let img = gradient(10, 10);

        save(&path.0, &img).unwrap();
        let (loaded, format) = load(&path.0).unwrap();

        assert_eq!(format, ImageFormat::Png);
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_bmp_round_trip() {
        let path = TempPath::new("round.bmp");
        let img = gradient(8, 4);

        save(&path.0, &img).unwrap();
        let (loaded, format) = load(&path.0).unwrap();

        assert_eq!(format, ImageFormat::Bmp);
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_jpeg_save_loads_back() {
        let path = TempPath::new("lossy.jpg");
        save(&path.0, &gradient(16, 16)).unwrap();

        // JPEG is lossy; only the dimensions are stable.
        let (loaded, format) = load(&path.0).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(loaded.width(), 16);
        assert_eq!(loaded.height(), 16);
    }

    #[test]
    fn test_webp_round_trip_for_uniform_image() {
        let path = TempPath::new("solid.webp");
        let img = solid([200, 40, 10, 255], 6, 6);

        save(&path.0, &img).unwrap();
        let (loaded, format) = load(&path.0).unwrap();

        assert_eq!(format, ImageFormat::WebP);
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_webp_rejects_non_uniform_image() {
        let path = TempPath::new("gradient.webp");
        let err = save(&path.0, &gradient(6, 6)).unwrap_err();
        assert!(matches!(err, IoError::Encode(_)));
    }

    #[test]
    fn test_gray_image_saves_as_png() {
        let path = TempPath::new("gray.png");
        let mut gray = RasterImage::zeroed(ChannelLayout::Gray8, Rect::from_size(4, 4));
        for (i, b) in gray.pixels_mut().iter_mut().enumerate() {
            *b = (i * 16) as u8;
        }

        save(&path.0, &gray).unwrap();
        let (loaded, _) = load(&path.0).unwrap();

        // Loading normalizes to RGBA; luma lands in all three color channels.
        assert_eq!(loaded.pixel_bytes(1, 0), &[16, 16, 16, 255]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = save("image.tiff", &gradient(2, 2)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));

        let err = save("no_extension", &gradient(2, 2)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("definitely/not/a/file.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_load_unrecognized_contents() {
        let path = TempPath::new("garbage.bin");
        fs::write(&path.0, b"not an image at all").unwrap();

        let err = load(&path.0).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
