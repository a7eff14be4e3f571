//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, GbpTheme, OutputMode, UserInterface};

/// Terminal UI writing results to stdout and diagnostics to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: GbpTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        let out = Term::stdout();
        let theme = if color && should_use_colors(&out) {
            GbpTheme::new()
        } else {
            GbpTheme::plain()
        };

        Self {
            out,
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &GbpTheme {
        &self.theme
    }

    fn print(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the UI for this process.
pub fn create_ui(mode: OutputMode, color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, color))
}
