//! Evolvable image individuals and their cached fitness

use crate::io::error::{BlendError, Result, invalid_parameter};
use crate::math::color::pack_rgb_bytes;
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Output-format metadata captured when a source image is decoded
///
/// The evolution core never looks inside; it travels with the individual so the
/// writer can fall back to the source format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageHeader {
    /// File the pixels came from
    pub source: PathBuf,
    /// Container format detected from the source path, if any
    pub format: Option<ImageFormat>,
}

impl ImageHeader {
    /// Record the origin of a decoded image
    pub fn from_path(path: &Path) -> Self {
        Self {
            source: path.to_path_buf(),
            format: ImageFormat::from_path(path).ok(),
        }
    }
}

/// One candidate output image
///
/// Colors are packed 24-bit codes in row-major pixel order. Any structural change
/// through [`Individual::colors_mut`] or [`Individual::set_weight`] drops the cached
/// fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    colors: Vec<u32>,
    weight: f64,
    width: u32,
    height: u32,
    header: ImageHeader,
    fitness: Option<f64>,
}

impl Individual {
    /// Build an individual from packed colors
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `colors` is empty
    /// - `colors.len()` differs from `width * height`
    /// - `weight` is not within `[0, 1]`
    pub fn new(
        colors: Vec<u32>,
        weight: f64,
        width: u32,
        height: u32,
        header: ImageHeader,
    ) -> Result<Self> {
        if colors.is_empty() {
            return Err(BlendError::EmptyImage {
                path: header.source,
            });
        }
        if colors.len() != width as usize * height as usize {
            return Err(invalid_parameter(
                "colors",
                &colors.len(),
                &format!("expected {width}x{height} pixels"),
            ));
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(invalid_parameter("weight", &weight, &"must be within [0, 1]"));
        }

        Ok(Self {
            colors,
            weight,
            width,
            height,
            header,
            fitness: None,
        })
    }

    /// Build an individual from a row-major RGB byte buffer
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Individual::new`]
    pub fn from_rgb_bytes(
        bytes: &[u8],
        weight: f64,
        width: u32,
        height: u32,
        header: ImageHeader,
    ) -> Result<Self> {
        Self::new(pack_rgb_bytes(bytes), weight, width, height, header)
    }

    /// Packed colors in pixel order
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Mutable access to the colors; invalidates the cached fitness
    pub fn colors_mut(&mut self) -> &mut [u32] {
        self.invalidate_fitness();
        &mut self.colors
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no pixels
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Blend contribution of this individual's lineage
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Replace the weight, clamped to `[0, 1]`; invalidates the cached fitness
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight.clamp(0.0, 1.0);
        self.invalidate_fitness();
    }

    /// Output width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Metadata of the originating image
    pub const fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// Cached fitness, `None` when stale
    pub const fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Store a freshly computed fitness
    pub const fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Mark the individual as modified since its last evaluation
    pub const fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Return the cached fitness, computing and caching it when stale
    pub fn fitness_or_evaluate(&mut self, evaluate: impl Fn(&Self) -> f64) -> f64 {
        if let Some(fitness) = self.fitness {
            return fitness;
        }
        let fitness = evaluate(self);
        self.fitness = Some(fitness);
        fitness
    }
}
