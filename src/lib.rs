//! Genetic blending of weighted source images into a single evolved image
//!
//! Source images become individuals of packed 24-bit colors. A generational
//! genetic algorithm with tournament selection, two-point blending crossover and
//! Gaussian mutation evolves them for a fixed number of generations, and the
//! fittest individual is written back out as an image.

#![forbid(unsafe_code)]

/// Individuals, fitness, genetic operators and the evolution engine
pub mod evolution;
/// Command-line interface, configuration, errors and image I/O
pub mod io;
/// Color packing and sequence statistics
pub mod math;

pub use io::error::{BlendError, Result};
