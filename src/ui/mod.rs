//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while the merge tool runs (indicatif spinner)
//! - Silent progress for `--quiet` and non-terminal stderr
//! - Styled summaries of list and merge results (see [`display`])
//!
//! All progress reporting goes through the [`ProgressReporter`] trait so the
//! bundle layer never depends on how (or whether) progress is shown.

pub mod display;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for the merge step
pub trait ProgressReporter {
    /// Show the latest merge event, e.g. `Merging base.apk`
    fn update(&mut self, message: &str);

    /// Merge finished successfully
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Spinner on stderr showing the module currently being merged
pub struct InteractiveProgressReporter {
    spinner: ProgressBar,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message("Preparing modules");
        spinner.enable_steady_tick(Duration::from_millis(120));

        Self { spinner }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn update(&mut self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    fn finish(&mut self) {
        self.spinner.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.spinner.abandon();
    }
}

/// No-op reporter used with `--quiet` or when stderr is not a terminal
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn update(&mut self, _message: &str) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
