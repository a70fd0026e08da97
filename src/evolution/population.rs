//! Initial population construction from weighted source images

use crate::evolution::individual::Individual;
use crate::io::error::{BlendError, Result};
use crate::io::image::ImageLoader;
use std::path::PathBuf;

/// One source image and its blend weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSource {
    /// Image file path
    pub path: PathBuf,
    /// Contribution to the blend, within `[0, 1]`
    pub weight: f64,
}

impl WeightedSource {
    /// Pair an image path with its weight
    pub fn new(path: impl Into<PathBuf>, weight: f64) -> Self {
        Self {
            path: path.into(),
            weight,
        }
    }
}

/// Builds populations by cycling through weighted sources
pub struct PopulationFactory<L> {
    loader: L,
}

impl<L: ImageLoader> PopulationFactory<L> {
    /// Create a factory decoding images through `loader`
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Build exactly `population_size` individuals
    ///
    /// Individual `i` comes from source `i % sources.len()`, so sources repeat when
    /// there are fewer sources than individuals. Each source is decoded at most once
    /// and later repeats are deep clones. Sources past `population_size` are never
    /// decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sources` is empty
    /// - Any used source fails to load; no partial population is returned
    pub fn build(
        &self,
        sources: &[WeightedSource],
        population_size: usize,
    ) -> Result<Vec<Individual>> {
        if sources.is_empty() {
            return Err(BlendError::Usage);
        }

        let mut decoded: Vec<Option<Individual>> = vec![None; sources.len()];
        let mut population = Vec::with_capacity(population_size);

        for i in 0..population_size {
            let slot = i % sources.len();
            let (Some(source), Some(cached)) = (sources.get(slot), decoded.get_mut(slot)) else {
                continue;
            };

            let individual = if let Some(individual) = cached.as_ref() {
                individual.clone()
            } else {
                let individual = self.load_source(source)?;
                *cached = Some(individual.clone());
                individual
            };
            population.push(individual);
        }

        tracing::info!(
            individuals = population.len(),
            sources = sources.len(),
            "built initial population"
        );

        Ok(population)
    }

    fn load_source(&self, source: &WeightedSource) -> Result<Individual> {
        let image = self.loader.load(&source.path)?;
        tracing::debug!(
            path = %source.path.display(),
            width = image.width,
            height = image.height,
            weight = source.weight,
            "decoded source image"
        );
        Individual::from_rgb_bytes(
            &image.pixels,
            source.weight,
            image.width,
            image.height,
            image.header,
        )
    }
}
