//! Minimal WebP lossless (VP8L) encoding for solid-color images.
//!
//! The encoder emits a single VP8L chunk whose five prefix codes each carry
//! exactly one symbol. A one-symbol code has a zero-length codeword, so the
//! pixel section of the bitstream is empty and every pixel decodes to the
//! same color. That makes the output exact for uniform images and wrong for
//! anything else, which is why the input is validated up front instead of
//! silently mis-encoding.

use thiserror::Error;

use super::bits::BitWriter;
use crate::raster::PixelSource;

/// VP8L bitstream signature byte.
const VP8L_SIGNATURE: u32 = 0x2F;

/// Largest dimension the 14-bit header fields can carry.
const MAX_DIMENSION: i32 = 1 << 14;

/// Symbol bit widths of the five prefix-code groups, in bitstream order:
/// green, red, blue, alpha, distance. Green and distance keep the full
/// 15-bit range reserved for the code-length extension symbols even though
/// only literal values are written here.
const GROUP_SYMBOL_BITS: [u32; 5] = [15, 8, 8, 8, 15];

/// Errors that can occur during WebP lossless encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero (or negative).
    #[error("invalid dimensions: width ({width}) and height ({height}) must be at least 1")]
    InvalidDimensions { width: i32, height: i32 },

    /// Width or height exceeds the 14-bit header field.
    #[error("dimensions {width}x{height} exceed the 16384x16384 header limit")]
    DimensionsTooLarge { width: i32, height: i32 },

    /// The image is not a single solid color.
    #[error("pixel at ({x}, {y}) differs from the top-left pixel; only solid-color images can be encoded")]
    NonUniformPixels { x: i32, y: i32 },
}

/// Encode a solid-color image as a minimal lossless WebP file.
///
/// Every pixel must equal the image's top-left pixel; the first differing
/// coordinate is reported as [`EncodeError::NonUniformPixels`]. The
/// reference color is read through [`PixelSource::pixel16`] and narrowed
/// to 8 bits per channel.
///
/// Returns the complete RIFF file contents, decodable by any conformant
/// WebP reader.
pub fn encode_webp_lossless<S: PixelSource>(image: &S) -> Result<Vec<u8>, EncodeError> {
    let bounds = image.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    if width < 1 || height < 1 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(EncodeError::DimensionsTooLarge { width, height });
    }

    let reference = image.pixel16(bounds.x0, bounds.y0);
    for y in bounds.y0..bounds.y1 {
        for x in bounds.x0..bounds.x1 {
            if image.pixel16(x, y) != reference {
                return Err(EncodeError::NonUniformPixels { x, y });
            }
        }
    }
    let [r, g, b, a] = reference.map(|c| u32::from(c >> 8));

    let mut bw = BitWriter::new();
    bw.write_bits(VP8L_SIGNATURE, 8);
    bw.write_bits(width as u32 - 1, 14);
    bw.write_bits(height as u32 - 1, 14);
    bw.write_bits(1, 1); // alpha may be used
    bw.write_bits(0, 3); // version

    bw.write_bits(0, 1); // no transforms
    bw.write_bits(0, 1); // no color cache

    // One prefix code per group. With a single symbol each codeword is
    // zero bits long, so no pixel data follows the code descriptions.
    let symbols = [g, r, b, a, 0];
    for (&symbol, &bits) in symbols.iter().zip(GROUP_SYMBOL_BITS.iter()) {
        write_single_symbol_code(&mut bw, symbol, bits);
    }

    Ok(wrap_riff(&bw.finish()))
}

/// Write a "simple" prefix code carrying exactly one literal symbol.
fn write_single_symbol_code(bw: &mut BitWriter, symbol: u32, bits: u32) {
    bw.write_bits(1, 1); // simple code
    bw.write_bits(0, 1); // symbol count - 1
    bw.write_bits(symbol, bits);
}

/// Wrap a VP8L payload in RIFF/WEBP container framing.
///
/// Chunk payloads are padded to an even length; the pad byte is not counted
/// in the chunk length field but is counted in the RIFF total size.
fn wrap_riff(payload: &[u8]) -> Vec<u8> {
    let padding = payload.len() % 2;
    let total = 4 + 4 + 4 + payload.len() + padding;

    let mut file = Vec::with_capacity(total + 8);
    file.extend_from_slice(b"RIFF");
    file.extend_from_slice(&(total as u32).to_le_bytes());
    file.extend_from_slice(b"WEBP");
    file.extend_from_slice(b"VP8L");
    file.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    file.extend_from_slice(payload);
    if padding > 0 {
        file.push(0);
    }
    file
}
