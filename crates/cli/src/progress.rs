//! Progress reporting for long passes over input files

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar on stderr; indicatif hides it when stderr is not a terminal
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Track a pass over `total_bytes` of input, or show a spinner when the
    /// size is unknown (stdin, gzip).
    pub fn new(total_bytes: Option<u64>) -> Self {
        let bar = match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓▒░-"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("[{elapsed_precise}] {spinner} {bytes} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };

        Self { bar }
    }

    /// Update position and the running counts
    pub fn update(&self, bytes: u64, records: usize, colliding_hashes: usize) {
        self.bar.set_position(bytes);
        self.bar.set_message(format!(
            "{} records | {} colliding hashes",
            format_number(records),
            format_number(colliding_hashes)
        ));
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Format large numbers with a K/M suffix
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
