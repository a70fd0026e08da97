//! Selection, crossover and mutation operators
//!
//! The engine never looks these up by name. It receives an [`Operators`] table at
//! construction, so tests and callers can substitute any of the four functions.

use crate::evolution::fitness::{FitnessWeights, evaluate_with};
use crate::evolution::individual::Individual;
use crate::io::configuration::{MUTATION_INDPB, MUTATION_SIGMA, TOURNAMENT_SIZE};
use crate::io::error::{Result, invalid_parameter};
use crate::math::color::{clamp_channel, pack, unpack};
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Fitness function injected into the engine
pub type EvaluateFn = Box<dyn Fn(&Individual) -> f64>;
/// Selection function injected into the engine; returns borrowed winners
pub type SelectFn =
    Box<dyn for<'a> Fn(&'a [Individual], usize, &mut StdRng) -> Vec<&'a Individual>>;
/// Crossover function injected into the engine
pub type MateFn = Box<dyn Fn(&mut Individual, &mut Individual, &mut StdRng)>;
/// Mutation function injected into the engine
pub type MutateFn = Box<dyn Fn(&mut Individual, &mut StdRng)>;

/// Tunables of the standard operator set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorConfig {
    /// Contestants per tournament
    pub tournament_size: usize,
    /// Per-pixel mutation probability
    pub indpb: f64,
    /// Standard deviation of the per-channel perturbation
    pub sigma: f64,
    /// Fitness term weights
    pub weights: FitnessWeights,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            tournament_size: TOURNAMENT_SIZE,
            indpb: MUTATION_INDPB,
            sigma: MUTATION_SIGMA,
            weights: FitnessWeights::default(),
        }
    }
}

/// The four functions driving one evolution run
pub struct Operators {
    /// Scores an individual
    pub evaluate: EvaluateFn,
    /// Picks `k` individuals from a population
    pub select: SelectFn,
    /// Recombines two offspring in place
    pub mate: MateFn,
    /// Perturbs one offspring in place
    pub mutate: MutateFn,
}

impl Operators {
    /// Assemble an operator table from plain functions or closures
    pub fn new<E, S, M, U>(evaluate: E, select: S, mate: M, mutate: U) -> Self
    where
        E: Fn(&Individual) -> f64 + 'static,
        S: for<'a> Fn(&'a [Individual], usize, &mut StdRng) -> Vec<&'a Individual> + 'static,
        M: Fn(&mut Individual, &mut Individual, &mut StdRng) + 'static,
        U: Fn(&mut Individual, &mut StdRng) + 'static,
    {
        Self {
            evaluate: Box::new(evaluate),
            select: Box::new(select),
            mate: Box::new(mate),
            mutate: Box::new(mutate),
        }
    }

    /// Tournament selection, two-point blend and Gaussian mutation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tournament size is zero
    /// - `indpb` is outside `[0, 1]`
    /// - `sigma` is negative or not finite
    pub fn standard(config: OperatorConfig) -> Result<Self> {
        if config.tournament_size == 0 {
            return Err(invalid_parameter(
                "tournament_size",
                &config.tournament_size,
                &"must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&config.indpb) {
            return Err(invalid_parameter(
                "indpb",
                &config.indpb,
                &"must be within [0, 1]",
            ));
        }
        if !config.sigma.is_finite() || config.sigma < 0.0 {
            return Err(invalid_parameter(
                "sigma",
                &config.sigma,
                &"must be finite and non-negative",
            ));
        }
        let normal = Normal::new(0.0, config.sigma).map_err(|e| {
            invalid_parameter("sigma", &config.sigma, &format!("not a valid deviation: {e}"))
        })?;

        let weights = config.weights;
        let tournament_size = config.tournament_size;
        let indpb = config.indpb;

        Ok(Self::new(
            move |ind| evaluate_with(ind, &weights),
            move |population, k, rng| {
                tournament_select(
                    population,
                    k,
                    tournament_size,
                    |ind| evaluate_with(ind, &weights),
                    rng,
                )
            },
            |a, b, rng| two_point_blend(a, b, rng),
            move |ind, rng| gaussian_mutate(ind, indpb, &normal, rng),
        ))
    }
}

/// Tournament selection with replacement
///
/// Runs `k` tournaments, each sampling `tournament_size` contestants uniformly.
/// The contestant with the highest fitness wins; a missing cached fitness is
/// computed with `evaluate` for the comparison only. Earlier contestants win ties.
/// Returns references into `population`; nothing is copied.
pub fn tournament_select<'a, R: Rng>(
    population: &'a [Individual],
    k: usize,
    tournament_size: usize,
    evaluate: impl Fn(&Individual) -> f64,
    rng: &mut R,
) -> Vec<&'a Individual> {
    if population.is_empty() {
        return Vec::new();
    }

    let mut chosen = Vec::with_capacity(k);
    for _ in 0..k {
        let mut winner: Option<(&Individual, f64)> = None;
        for _ in 0..tournament_size.max(1) {
            let Some(contestant) = population.get(rng.random_range(0..population.len())) else {
                continue;
            };
            let score = contestant
                .fitness()
                .unwrap_or_else(|| evaluate(contestant));
            if winner.is_none_or(|(_, best)| score > best) {
                winner = Some((contestant, score));
            }
        }
        if let Some((individual, _)) = winner {
            chosen.push(individual);
        }
    }
    chosen
}

/// Pick cut points `a < b` uniformly among all pairs in `0..=len`
pub fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let first = rng.random_range(0..=len);
    let mut second = rng.random_range(0..len);
    if second >= first {
        second += 1;
    }
    (first.min(second), first.max(second))
}

/// Two-point crossover followed by weight averaging
///
/// Swaps `colors[a..b]` between the two individuals with cut points drawn over the
/// shorter of the two lengths, so differently sized individuals never fail. Both
/// weights become the mean of the two previous weights, and both fitnesses are
/// invalidated.
pub fn two_point_blend<R: Rng>(a: &mut Individual, b: &mut Individual, rng: &mut R) {
    let shared = a.len().min(b.len());
    let (start, end) = cut_points(shared, rng);

    if let (Some(left), Some(right)) = (
        a.colors_mut().get_mut(start..end),
        b.colors_mut().get_mut(start..end),
    ) {
        left.swap_with_slice(right);
    }

    let blended = (a.weight() + b.weight()) / 2.0;
    a.set_weight(blended);
    b.set_weight(blended);
}

/// Per-pixel Gaussian perturbation with channel clamping
///
/// Each pixel is selected with probability `indpb`; a selected pixel has each of
/// its channels shifted by an independent draw from `noise`, rounded and clamped to
/// `[0, 255]`. The fitness is invalidated even when no pixel was selected.
pub fn gaussian_mutate<R: Rng>(
    individual: &mut Individual,
    indpb: f64,
    noise: &Normal<f64>,
    rng: &mut R,
) {
    for color in individual.colors_mut() {
        if rng.random::<f64>() < indpb {
            let [r, g, b] = unpack(*color);
            let r = clamp_channel(f64::from(r) + noise.sample(rng));
            let g = clamp_channel(f64::from(g) + noise.sample(rng));
            let b = clamp_channel(f64::from(b) + noise.sample(rng));
            *color = pack(r, g, b);
        }
    }
}
