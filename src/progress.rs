use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_THRESHOLD: u64 = 10;
const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar for multi-file runs; a no-op for small batches.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, enabled: bool) -> Self {
        let bar = (enabled && total >= PROGRESS_THRESHOLD).then(|| {
            let style = ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-");
            ProgressBar::new(total).with_style(style)
        });
        Self { bar }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance by one file, showing its name.
    pub fn file_done(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
