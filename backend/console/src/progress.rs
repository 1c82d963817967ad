use catalog::Progress;
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal bar over the parent loop of a link aggregation.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);

        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }

        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn advance(&self, current: usize, _total: usize, parent: &str) {
        self.bar.set_position(current.saturating_sub(1) as u64);
        self.bar.set_message(format!("Fetching {parent}"));
    }

    fn finish(&self, collected: usize) {
        if let Some(length) = self.bar.length() {
            self.bar.set_position(length);
        }

        self.bar.finish_with_message(format!("Collected {collected} links"));
    }
}
