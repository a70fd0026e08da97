//! Generation progress display for a single evolution run

use crate::evolution::engine::GenerationStats;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the generations of one run
///
/// The bar is hidden when constructed with `visible = false`, so callers can
/// drive it unconditionally.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar for `generations` steps
    pub fn new(generations: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(generations as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(GENERATION_STYLE.clone());
        Self { bar }
    }

    /// Advance to a completed generation and show its best fitness
    pub fn record(&self, stats: &GenerationStats) {
        self.bar.set_position(stats.generation as u64);
        self.bar
            .set_message(format!("best {:.4e}", stats.best_fitness));
    }

    /// Generations recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
