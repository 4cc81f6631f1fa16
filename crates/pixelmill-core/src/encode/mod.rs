//! Image encoding for export.
//!
//! This module provides:
//! - A bit-level writer for LSB-first bitstream packing
//! - A minimal lossless WebP encoder for solid-color images
//!
//! Encoding is strictly single-threaded: one encode call owns one
//! [`BitWriter`] from start to finish.

mod bits;
mod webp;

pub use bits::BitWriter;
pub use webp::{encode_webp_lossless, EncodeError};
