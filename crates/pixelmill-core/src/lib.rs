//! Pixelmill Core - Parallel image processing engine
//!
//! This crate provides row-parallel pixel transforms over dense raster
//! buffers, a minimal lossless WebP encoder for solid-color images, and a
//! thin file I/O layer on top of the `image` crate's codecs.
//!
//! # Architecture
//!
//! Pixels flow in through the [`PixelSource`] capability (implemented by
//! [`RasterImage`] and by the `image` crate's RGBA buffers), are transformed
//! by [`GrayscaleFilter`], [`resize_bilinear`], or [`crop`] into a fresh
//! [`RasterImage`], and flow out either as a new buffer or as encoded bytes.
//! Inputs are never mutated.
//!
//! Grayscale and resize fan their work out across scoped worker threads,
//! one disjoint run of destination rows per worker; the worker count is an
//! explicit [`Parallelism`] value so results can be pinned and reproduced.
//! Output is bit-identical for any worker count.

pub mod crop;
pub mod encode;
pub mod filters;
pub mod io;
pub mod parallel;
pub mod processor;
pub mod raster;
pub mod resample;

pub use crop::crop;
pub use encode::{encode_webp_lossless, BitWriter, EncodeError};
pub use filters::{Filter, GrayscaleFilter};
pub use io::{load, save, IoError};
pub use parallel::{fill_rows, partition_rows, Parallelism, RowRange};
pub use processor::{DefaultProcessor, Processor};
pub use raster::{ChannelLayout, PixelSource, RasterImage, Rect};
pub use resample::resize_bilinear;
