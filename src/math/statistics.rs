//! Summary statistics over packed color sequences
//!
//! Packed colors are treated as plain numeric samples here; no channel-wise
//! interpretation happens in this module.

use std::collections::HashMap;

/// Arithmetic mean, zero for an empty sequence
pub fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: f64 = values.iter().map(|&v| f64::from(v)).sum();
    total / values.len() as f64
}

/// Population standard deviation (divides by `n`), zero for an empty sequence
pub fn population_std_dev(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mu;
            d * d
        })
        .sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Number of maximal runs of identical adjacent values
///
/// `[1, 1, 2, 1]` has three runs. An empty sequence has none.
pub fn count_runs(values: &[u32]) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values
        .windows(2)
        .filter(|pair| matches!(pair, [a, b] if a != b))
        .count()
}

/// Occurrence counts for each distinct color, kept in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    entries: Vec<(u32, usize)>,
}

impl ColorHistogram {
    /// Count every color in the sequence
    pub fn from_colors(colors: &[u32]) -> Self {
        let mut slots: HashMap<u32, usize> = HashMap::new();
        let mut entries: Vec<(u32, usize)> = Vec::new();

        for &color in colors {
            if let Some(&slot) = slots.get(&color) {
                if let Some(entry) = entries.get_mut(slot) {
                    entry.1 += 1;
                }
            } else {
                slots.insert(color, entries.len());
                entries.push((color, 1));
            }
        }

        Self { entries }
    }

    /// Number of distinct colors
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Most and second most frequent colors
    ///
    /// Ties go to the color seen first in the sequence. The secondary color is
    /// `None` when fewer than two distinct colors exist.
    pub fn dominant_pair(&self) -> Option<(u32, Option<u32>)> {
        let primary = Self::most_frequent(self.entries.iter())?;
        let secondary = Self::most_frequent(self.entries.iter().filter(|&&(c, _)| c != primary));
        Some((primary, secondary))
    }

    fn most_frequent<'a>(entries: impl Iterator<Item = &'a (u32, usize)>) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for &(color, n) in entries {
            if best.is_none_or(|(_, top)| n > top) {
                best = Some((color, n));
            }
        }
        best.map(|(color, _)| color)
    }
}
