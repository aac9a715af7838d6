//! Colored output helpers for the CLI.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects the `NO_COLOR` environment variable.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Styled output writer for terminal.
pub struct StyledOutput {
    stdout: StandardStream,
}

impl StyledOutput {
    /// Create a styled output writer, auto-detecting color support.
    pub fn new() -> Self {
        Self {
            stdout: StandardStream::stdout(color_choice()),
        }
    }

    fn writeln_styled(&mut self, text: &str, color: Color) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(true);
        let _ = self.stdout.set_color(&spec);
        let _ = writeln!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Green bold line for a completed operation.
    pub fn success(&mut self, text: &str) {
        self.writeln_styled(text, Color::Green);
    }
}

impl Default for StyledOutput {
    fn default() -> Self {
        Self::new()
    }
}
