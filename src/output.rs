// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Renders progress in normal, quiet (CI), and JSON modes.

use dockwire::progress::{ProgressEvent, format_progress};
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress lines
    Normal,
    /// Only the final result
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Instant,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: Instant::now(),
        }
    }

    fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Print one progress event from the engine.
    pub fn progress(&self, event: &ProgressEvent) {
        match self.mode {
            OutputMode::Normal => {
                let line = format_progress(event);
                if !line.is_empty() {
                    println!("{line}");
                }
            }
            OutputMode::Quiet => {}
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&JsonProgress {
                    event: "progress",
                    progress: event,
                }) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a success message with timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message} ({:.1}s)", self.elapsed_secs()),
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.json_line("success", message, false),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => self.json_line("error", message, true),
        }
    }

    fn json_line(&self, event: &str, message: &str, to_stderr: bool) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.elapsed_secs(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    duration_secs: f64,
}

#[derive(Serialize)]
struct JsonProgress<'a> {
    event: &'a str,
    #[serde(flatten)]
    progress: &'a ProgressEvent,
}
