//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals
//! - [`MockUI`] for capturing output in tests
//! - Tables and timestamp formatting
//!
//! Command results go through [`UserInterface::print`] to stdout; status
//! lines respect the [`OutputMode`]; warnings and errors go to stderr.
//!
//! # Example
//!
//! ```
//! use gbpcli::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.print("lighthouse 3226");
//! ui.success("Published");
//!
//! assert_eq!(ui.printed(), ["lighthouse 3226"]);
//! assert!(ui.has_success("Published"));
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;
pub mod time;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, GbpTheme};
pub use time::{format_relative_time, format_timestamp};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// The theme used to style output.
    fn theme(&self) -> &GbpTheme;

    /// Print command output. Shown in every mode.
    fn print(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
