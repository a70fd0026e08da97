//! Evolution constants and runtime configuration defaults

// Population and generation budget
/// Number of individuals in every generation
pub const NUM_IND: usize = 30;
/// Number of generations performed by a run
pub const NUM_GEN: usize = 50;

// Operator probabilities
/// Probability that an adjacent offspring pair is crossed over
pub const PROB_MATE: f64 = 0.6;
/// Probability that an offspring is mutated
pub const PROB_MUT: f64 = 0.3;
/// Per-pixel probability of perturbation inside a mutation
pub const MUTATION_INDPB: f64 = 0.01;
/// Standard deviation of the per-channel Gaussian perturbation
pub const MUTATION_SIGMA: f64 = 8.0;
/// Number of contestants sampled per tournament
pub const TOURNAMENT_SIZE: usize = 3;

// Fitness term weights
/// Weight of the normalized mean color
pub const W_AVG: f64 = 0.3;
/// Weight of the normalized dominant color
pub const W_MODE: f64 = 0.1;
/// Weight of the normalized standard deviation penalty
pub const W_STD: f64 = 0.3;
/// Scale applied to the contiguous color run count
pub const W_DISTINCT: f64 = 0.5;

/// Largest packed 24-bit color
pub const MAX_PACKED_COLOR: u32 = 0x00FF_FFFF;

/// Tolerance for input weights summing to one
pub const WEIGHT_EPSILON: f64 = 1e-6;

// A channel difference above this marks a pixel as foreground when trimming
/// Background trim threshold per channel
pub const TRIM_TOLERANCE: u8 = 100;

// Default values for configurable parameters
/// Fixed seed for reproducible evolution
pub const DEFAULT_SEED: u64 = 42;
/// Output file written on success
pub const DEFAULT_OUTPUT: &str = "output.png";

// Progress bar display settings
/// Width of the generation progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
