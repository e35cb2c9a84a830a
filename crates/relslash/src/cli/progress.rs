//! Download progress bar.

use std::time::Duration;

use futures_util::future::{self, BoxFuture};
use indicatif::{ProgressBar, ProgressStyle};
use relslash_fetch::{OnProgress, Progress};

/// Byte-count bar on stderr; hidden when disabled.
pub struct DownloadBar {
    bar: ProgressBar,
}

impl DownloadBar {
    pub fn new(label: &str, enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::no_length();
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                .expect("static progress template")
                .progress_chars("#>-"),
        );
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl OnProgress for DownloadBar {
    fn on_progress(&self, progress: Progress) -> BoxFuture<'_, ()> {
        if let Some(total) = progress.total_bytes {
            self.bar.set_length(total);
        }
        self.bar.set_position(progress.bytes_read);
        Box::pin(future::ready(()))
    }
}
