//! Progress indicators for catalog operations
//!
//! Wraps `indicatif` spinners with consistent styling. Spinners are used while
//! the catalog is being listed and while helmfiles download; all of them honor
//! the `HELMWEAVE_NO_PROGRESS` environment variable so scripted runs and CI
//! logs stay clean.
//!
//! # Examples
//!
//! ```rust
//! use helmweave::utils::progress::ProgressBar;
//!
//! let spinner = ProgressBar::new_spinner();
//! spinner.set_message("Fetching module list...");
//! // long-running operation
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

use crate::constants::NO_PROGRESS_ENV;

/// Checks if progress indicators should be disabled.
///
/// Spinners are disabled when `HELMWEAVE_NO_PROGRESS` is set to any value.
fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// A spinner with consistent styling and quiet-mode support.
///
/// When progress is disabled the underlying bar is hidden and every operation
/// becomes a no-op, so call sites never need to branch on the environment.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a spinner for indeterminate network operations.
    ///
    /// The animation updates every 100ms until finished.
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    /// Sets the message displayed next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Sets the prefix displayed before the spinner.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Completes the spinner, leaving `msg` on the terminal.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Completes the spinner and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
