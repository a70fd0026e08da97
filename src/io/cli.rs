//! Command-line interface for blending weighted images into one evolved image

use crate::evolution::engine::{EvolutionEngine, EvolutionParams};
use crate::evolution::fitness::FitnessWeights;
use crate::evolution::operators::{OperatorConfig, Operators};
use crate::evolution::population::{PopulationFactory, WeightedSource};
use crate::io::configuration::{
    DEFAULT_OUTPUT, DEFAULT_SEED, MUTATION_INDPB, MUTATION_SIGMA, NUM_GEN, NUM_IND, PROB_MATE,
    PROB_MUT, TOURNAMENT_SIZE, WEIGHT_EPSILON,
};
use crate::io::error::{BlendError, Result};
use crate::io::image::{FileImageLoader, ImageLoader, export_individual};
use crate::io::progress::ProgressManager;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "genblend")]
#[command(
    author,
    version,
    about = "Evolve one image by genetically blending weighted source images"
)]
/// Command-line arguments for the blending tool
pub struct Cli {
    /// Source images, each followed by its weight; weights must add up to 1
    #[arg(value_name = "IMAGE WEIGHT", allow_hyphen_values = true)]
    pub inputs: Vec<String>,

    /// Random seed for reproducible evolution
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of generations to evolve
    #[arg(short, long, default_value_t = NUM_GEN)]
    pub generations: usize,

    /// Number of individuals per generation
    #[arg(short, long, default_value_t = NUM_IND)]
    pub population: usize,

    /// Probability of crossing over each adjacent pair
    #[arg(long, default_value_t = PROB_MATE)]
    pub prob_mate: f64,

    /// Probability of mutating each individual
    #[arg(long, default_value_t = PROB_MUT)]
    pub prob_mut: f64,

    /// Per-pixel probability of perturbation within a mutation
    #[arg(long, default_value_t = MUTATION_INDPB)]
    pub indpb: f64,

    /// Standard deviation of the per-channel perturbation
    #[arg(long, default_value_t = MUTATION_SIGMA)]
    pub sigma: f64,

    /// Output image path; the extension selects the format
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Crop uniform background borders from each source image
    #[arg(short, long)]
    pub trim: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Validated image/weight pairs
    ///
    /// # Errors
    ///
    /// Returns an argument error as described in [`pair_sources`]
    pub fn weighted_sources(&self) -> Result<Vec<WeightedSource>> {
        pair_sources(&self.inputs)
    }

    /// Evolution budget and probabilities
    pub const fn evolution_params(&self) -> EvolutionParams {
        EvolutionParams {
            population_size: self.population,
            generations: self.generations,
            prob_mate: self.prob_mate,
            prob_mut: self.prob_mut,
        }
    }

    /// Settings of the standard operator set
    pub fn operator_config(&self) -> OperatorConfig {
        OperatorConfig {
            tournament_size: TOURNAMENT_SIZE,
            indpb: self.indpb,
            sigma: self.sigma,
            weights: FitnessWeights::default(),
        }
    }
}

/// Parse one weight argument
///
/// # Errors
///
/// Returns [`BlendError::InvalidWeight`] if the value is not a number within `[0, 1]`
pub fn parse_weight(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| (0.0..=1.0).contains(w))
        .ok_or_else(|| BlendError::InvalidWeight {
            value: value.to_string(),
        })
}

/// Check that weights add up to one within [`WEIGHT_EPSILON`]
///
/// # Errors
///
/// Returns [`BlendError::WeightSum`] carrying the actual total otherwise
pub fn validate_weight_sum(sources: &[WeightedSource]) -> Result<()> {
    let total: f64 = sources.iter().map(|s| s.weight).sum();
    if (total - 1.0).abs() > WEIGHT_EPSILON {
        return Err(BlendError::WeightSum { total });
    }
    Ok(())
}

/// Turn `image weight image weight ...` arguments into weighted sources
///
/// Nothing is read from disk here.
///
/// # Errors
///
/// Returns an error if:
/// - No arguments were given or their count is odd
/// - A weight does not parse or falls outside `[0, 1]`
/// - The weights do not add up to one
pub fn pair_sources(inputs: &[String]) -> Result<Vec<WeightedSource>> {
    if inputs.is_empty() || inputs.len() % 2 != 0 {
        return Err(BlendError::Usage);
    }

    let sources = inputs
        .chunks_exact(2)
        .map(|pair| match pair {
            [path, weight] => Ok(WeightedSource::new(path, parse_weight(weight)?)),
            _ => Err(BlendError::Usage),
        })
        .collect::<Result<Vec<_>>>()?;

    validate_weight_sum(&sources)?;
    Ok(sources)
}

/// Runs one blend from validated arguments to the written output file
pub struct BlendRunner {
    cli: Cli,
}

impl BlendRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, evolve and write using images from the filesystem
    ///
    /// # Errors
    ///
    /// Returns an error as described in [`BlendRunner::run_with_loader`]
    pub fn run(&self) -> Result<PathBuf> {
        self.run_with_loader(FileImageLoader::new(self.cli.trim))
    }

    /// Load, evolve and write using a caller-supplied image loader
    ///
    /// Arguments are fully validated before any image is loaded, and the output
    /// file is only written once evolution completes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image/weight arguments are invalid
    /// - Evolution parameters are out of range
    /// - Any source image fails to load
    /// - The result cannot be written
    pub fn run_with_loader<L: ImageLoader>(&self, loader: L) -> Result<PathBuf> {
        let start_time = Instant::now();
        let sources = self.cli.weighted_sources()?;
        let params = self.cli.evolution_params();
        params.validate()?;
        let operators = Operators::standard(self.cli.operator_config())?;

        let population = PopulationFactory::new(loader).build(&sources, params.population_size)?;
        let mut engine = EvolutionEngine::new(population, params, operators, self.cli.seed)?;

        let progress = ProgressManager::new(params.generations, self.cli.should_show_progress());
        let best = engine.run(|stats| progress.record(stats))?;
        progress.finish();

        export_individual(best, &self.cli.output)?;
        tracing::info!(
            output = %self.cli.output.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "wrote evolved image"
        );

        Ok(self.cli.output.clone())
    }
}
