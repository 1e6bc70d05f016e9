//! Rasterkit Core - Raster image transformation library
//!
//! This crate provides the pixel-level engines behind Rasterkit: format
//! conversion, resizing, watermark add/remove, color-grading presets,
//! background padding, multi-image splicing, and histogram computation.
//! Everything operates on the RGBA8 [`PixelBuffer`]; decoding inputs and
//! moving bytes in and out of the process is the caller's concern, apart
//! from the [`encode`] glue for producing output files.
//!
//! Operations are pure: they take a buffer (plus typed options) and return
//! a new buffer, never touching the input. Randomized operations take an
//! explicit `rand::Rng` so callers can seed for reproducible output.

pub mod buffer;
pub mod composite;
pub mod convolve;
pub mod encode;
pub mod error;
pub mod grade;
pub mod histogram;
pub mod inpaint;
pub mod layout;
pub mod ops;
pub mod options;
pub mod transform;

pub use buffer::{Color, PixelBuffer};
pub use error::EngineError;
pub use grade::FilterPreset;
pub use histogram::{compute_histogram, Histogram};
pub use ops::{apply, apply_splice, Operation, OperationResult};
pub use options::{
    Anchor, BackgroundOptions, ConvertOptions, FilterOptions, MaskOptions, OutputFormat,
    ResizeOptions, SpliceOptions, WatermarkOptions,
};
