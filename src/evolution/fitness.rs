//! Fitness scoring of packed color sequences
//!
//! The score rewards a bright mean and a bright dominant color, penalizes spread,
//! and divides by the number of contiguous color runs so that fragmented images
//! rank lower. The whole expression is scaled by the individual's blend weight.

use crate::evolution::individual::Individual;
use crate::io::configuration::{MAX_PACKED_COLOR, W_AVG, W_DISTINCT, W_MODE, W_STD};
use crate::math::statistics::{ColorHistogram, count_runs, mean, population_std_dev};

/// Weights of the individual fitness terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessWeights {
    /// Weight of the normalized mean
    pub avg: f64,
    /// Weight of the normalized dominant color
    pub mode: f64,
    /// Weight of the normalized standard deviation
    pub std: f64,
    /// Scale of the run-count divisor
    pub distinct: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            avg: W_AVG,
            mode: W_MODE,
            std: W_STD,
            distinct: W_DISTINCT,
        }
    }
}

/// Intermediate terms of one fitness evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessBreakdown {
    /// Contiguous color runs in pixel order
    pub num_colors: usize,
    /// Distinct colors regardless of position
    pub distinct_colors: usize,
    /// Most frequent color
    pub primary: u32,
    /// Second most frequent color, absent for single-color individuals
    pub secondary: Option<u32>,
    /// Primary color over the largest packed color
    pub mode_val: f64,
    /// Mean packed color over 255
    pub avg_val: f64,
    /// Population standard deviation of packed colors over 255
    pub std_val: f64,
    /// Signed primary minus secondary, zero without a secondary color
    pub color_diff: i64,
    /// Final weighted score
    pub score: f64,
}

/// Compute every fitness term for a color sequence and blend weight
pub fn breakdown(colors: &[u32], weight: f64, weights: &FitnessWeights) -> FitnessBreakdown {
    let histogram = ColorHistogram::from_colors(colors);
    let num_colors = count_runs(colors);
    let (primary, secondary) = histogram.dominant_pair().unwrap_or((0, None));

    let mode_val = f64::from(primary) / f64::from(MAX_PACKED_COLOR);
    let avg_val = mean(colors) / 255.0;
    let std_val = population_std_dev(colors) / 255.0;
    let color_diff = secondary.map_or(0, |s| i64::from(primary) - i64::from(s));

    let numerator = weights.std.mul_add(
        -std_val,
        weights.avg.mul_add(avg_val, weights.mode * mode_val),
    );
    let divisor = weights.distinct * num_colors.max(1) as f64;
    let score = if divisor > 0.0 {
        weight * numerator / divisor
    } else {
        0.0
    };

    FitnessBreakdown {
        num_colors,
        distinct_colors: histogram.distinct(),
        primary,
        secondary,
        mode_val,
        avg_val,
        std_val,
        color_diff,
        score,
    }
}

/// Score an individual with the default term weights; higher is fitter
pub fn evaluate(individual: &Individual) -> f64 {
    evaluate_with(individual, &FitnessWeights::default())
}

/// Score an individual with explicit term weights
pub fn evaluate_with(individual: &Individual, weights: &FitnessWeights) -> f64 {
    let terms = breakdown(individual.colors(), individual.weight(), weights);
    tracing::trace!(
        runs = terms.num_colors,
        distinct = terms.distinct_colors,
        primary = terms.primary,
        color_diff = terms.color_diff,
        score = terms.score,
        "evaluated individual"
    );
    terms.score
}
