use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Numbered stage display on stderr: a spinner while a stage runs, then a
/// check mark with elapsed time and one dimmed line per detail.
pub struct StageDisplay {
    spinner: Option<ProgressBar>,
    started: Instant,
    stage_started: Instant,
    stage: u8,
    total_stages: u8,
}

impl StageDisplay {
    pub fn new(total_stages: u8) -> Self {
        let now = Instant::now();
        Self {
            spinner: None,
            started: now,
            stage_started: now,
            stage: 0,
            total_stages,
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn start(&mut self, description: &str) {
        self.clear_spinner();
        self.stage += 1;
        self.stage_started = Instant::now();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message(format!(
            "[{}/{}] {description}...",
            self.stage, self.total_stages
        ));
        self.spinner = Some(spinner);
    }

    pub fn complete(&mut self, description: &str, details: &[String]) {
        self.clear_spinner();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            self.stage_started.elapsed().as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {detail}");
        }
    }

    pub fn finish(mut self, summary: &str) {
        self.clear_spinner();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
        );
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<20} {:>33}",
            summary,
            format!("Total: {:.2}s", self.started.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }
}

pub enum Progress {
    Interactive(StageDisplay),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_stages: u8) -> Self {
        if interactive {
            Self::Interactive(StageDisplay::new(total_stages))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(display) = self {
            display.start(description);
        }
    }

    pub fn complete_step(&mut self, description: &str, details: &[String]) {
        if let Self::Interactive(display) = self {
            display.complete(description, details);
        }
    }

    pub fn finish(self, summary: &str) {
        if let Self::Interactive(display) = self {
            display.finish(summary);
        }
    }
}
