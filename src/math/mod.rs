//! Mathematical utilities for color sequences

/// Packing and unpacking of 24-bit RGB color codes
pub mod color;
/// Mean, deviation, run counting and histograms over packed colors
pub mod statistics;
