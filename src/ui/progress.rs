use indicatif::{ProgressBar, ProgressStyle};

/// Progress over the concurrency sequence, drawn on stderr so stdout
/// stays clean for the report.
pub fn sweep_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("▕{bar:25}▏ {pos}/{len} • {msg}")
            .expect("Invalid progress template")
            .progress_chars("█░ "),
    );
    pb
}
