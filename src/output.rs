use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Abstraction over user-facing output.
///
/// Pipeline steps use this trait instead of `println!`/`eprintln!` so that
/// output can be captured in tests and suppressed in scripted runs.
pub trait Reporter: Send + Sync {
    /// Informational status message (e.g., "Creating virtual environment...")
    fn status(&self, message: &str);

    /// Success message (e.g., "Dependencies installed")
    fn success(&self, message: &str);

    /// Warning message; reported but never blocks the pipeline.
    fn warning(&self, message: &str);

    /// Fatal diagnostic, printed on the failure path before exiting.
    fn fatal(&self, message: &str);

    /// Inline progress (no trailing newline). Call `finish_progress` after.
    fn progress(&self, message: &str);

    /// Finish an inline progress line with a result.
    fn finish_progress(&self, result: &str);

    /// A blank line separator.
    fn blank(&self);

    /// Block until the user acknowledges the output. Invoked on the failure
    /// path so the diagnostics are not lost when the hosting console window
    /// closes with the process.
    fn acknowledge(&self);
}

/// Standard CLI output backed by stdout/stderr, with ANSI color on fatal
/// and warning messages.
pub struct ConsoleReporter {
    /// When false, `acknowledge` returns immediately (scripted runs).
    pause_enabled: bool,
}

impl ConsoleReporter {
    pub fn new(pause_enabled: bool) -> Self {
        Self { pause_enabled }
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("\x1b[33m{}\x1b[0m", message);
    }

    fn fatal(&self, message: &str) {
        eprintln!("\x1b[31m{}\x1b[0m", message);
    }

    fn progress(&self, message: &str) {
        print!("{}", message);
        std::io::stdout().flush().ok();
    }

    fn finish_progress(&self, result: &str) {
        println!("{}", result);
    }

    fn blank(&self) {
        println!();
    }

    fn acknowledge(&self) {
        if !self.pause_enabled {
            return;
        }
        print!("Press Enter to close... ");
        std::io::stdout().flush().ok();
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok();
    }
}

/// Records every call. Used by tests to assert on reported output.
#[derive(Default)]
pub struct CapturingReporter {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages as (kind, text) pairs, in order.
    pub fn messages(&self) -> Vec<(&'static str, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// Texts of all messages of one kind.
    pub fn of_kind(&self, kind: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn record(&self, kind: &'static str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}

impl Reporter for CapturingReporter {
    fn status(&self, message: &str) {
        self.record("status", message);
    }

    fn success(&self, message: &str) {
        self.record("success", message);
    }

    fn warning(&self, message: &str) {
        self.record("warning", message);
    }

    fn fatal(&self, message: &str) {
        self.record("fatal", message);
    }

    fn progress(&self, message: &str) {
        self.record("progress", message);
    }

    fn finish_progress(&self, result: &str) {
        self.record("finish_progress", result);
    }

    fn blank(&self) {}

    fn acknowledge(&self) {
        self.record("acknowledge", "");
    }
}
