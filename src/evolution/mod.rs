//! Genetic evolution of image individuals
//!
//! This module contains the evolutionary core:
//! - Individuals and their cached fitness
//! - Population construction from weighted sources
//! - Fitness scoring, genetic operators and the generation loop

/// Generation loop and run state
pub mod engine;
/// Fitness scoring of packed color sequences
pub mod fitness;
/// Evolvable image individuals
pub mod individual;
/// Tournament selection, two-point blend and Gaussian mutation
pub mod operators;
/// Initial population construction
pub mod population;

pub use engine::EvolutionEngine;
pub use individual::Individual;
