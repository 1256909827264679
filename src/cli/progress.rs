//! Spinner shown on stderr while the backend is being queried

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a steady-ticking spinner. Hidden automatically when stderr is not a terminal.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
