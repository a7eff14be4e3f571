//! Visual theme and styling.

use console::Style;

/// Terminal styles used by the CLI.
#[derive(Debug, Clone)]
pub struct GbpTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for build flags such as published and kept (cyan).
    pub flag: Style,
    /// Style for tags (magenta).
    pub tag: Style,
}

impl Default for GbpTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl GbpTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            flag: Style::new().cyan(),
            tag: Style::new().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            flag: Style::new(),
            tag: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }
}

/// Check if colors should be enabled for the given terminal.
pub fn should_use_colors(term: &console::Term) -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    term.is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = GbpTheme::plain().format_success("Published lighthouse 3226");
        assert!(msg.contains("✓"));
        assert!(msg.contains("lighthouse 3226"));
    }

    #[test]
    fn theme_formats_warning() {
        let msg = GbpTheme::plain().format_warning("no builds");
        assert!(msg.contains("⚠"));
    }

    #[test]
    fn plain_error_is_unchanged() {
        assert_eq!(GbpTheme::plain().format_error("error: boom"), "error: boom");
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(
            GbpTheme::default().format_success("ok"),
            GbpTheme::new().format_success("ok")
        );
    }
}
