//! Progress display while versions are being looked up
//!
//! Drawn on stderr with indicatif; indicatif draws nothing when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.cyan} Checking {len} packages [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Progress reporter for the lookup phase
pub struct Progress {
    /// Disabled in quiet mode
    enabled: bool,
    bar: Option<ProgressBar>,
    failed: AtomicUsize,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: None,
            failed: AtomicUsize::new(0),
        }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Start the bar for `total` lookups
    pub fn start(&mut self, total: u64) {
        self.failed.store(0, Ordering::Relaxed);
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .map(|style| style.progress_chars("█▓▒░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Record one finished lookup
    pub fn record(&self, package: &str, resolved: bool) {
        let failed = if resolved {
            self.failed.load(Ordering::Relaxed)
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed) + 1
        };

        if let Some(ref bar) = self.bar {
            bar.inc(1);
            if failed == 0 {
                bar.set_message(package.to_string());
            } else {
                bar.set_message(format!("{} ({} failed)", package, failed));
            }
        }
    }

    /// Lookups recorded as failed since the last `start`
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    /// Clear the bar from the terminal
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}
