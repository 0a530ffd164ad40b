//! Diagnostic formatting for minification failures
//!
//! Renders a [`MinifyError`] with the offending line of the script and a
//! caret under the column where scanning gave up.

use super::{MinifyError, SourceLocation};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic<'a> {
    error: &'a MinifyError,
    source: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Create a new diagnostic from an error
    pub fn new(error: &'a MinifyError) -> Self {
        Self {
            error,
            source: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: &'a MinifyError, source: &'a str) -> Self {
        Self {
            error,
            source: Some(source),
        }
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let kind = self.error.kind().red().bold();
        output.push_str(&format!("{}: {}\n", kind, self.error));

        if let Some(location) = self.error.location() {
            output.push_str(&format!("  {} {}\n", "-->".blue().bold(), location));

            if let Some(source) = self.source {
                output.push_str(&self.format_source_context(source, location));
            }
            output.push_str(&format!(
                "  {} the script was kept unminified\n",
                "note:".yellow().bold()
            ));
        }

        output
    }

    /// Format the offending line with its neighbours and a caret
    fn format_source_context(&self, source: &str, location: &SourceLocation) -> String {
        let mut output = String::new();
        let lines: Vec<&str> = source.lines().collect();

        if location.line == 0 || location.line > lines.len() {
            return output;
        }

        let line_idx = location.line - 1;
        let line_num_width = (location.line + 1).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = line_num_width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", location.line, width = line_num_width)
                .blue()
                .bold(),
            lines[line_idx]
        ));

        let indicator_padding = " ".repeat(line_num_width + 2 + location.column.saturating_sub(1) + 1);
        output.push_str(&format!("{}{}\n", indicator_padding, "^".red().bold()));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = line_num_width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_without_source() {
        let err = MinifyError::UnterminatedString {
            location: SourceLocation::at(1, 1),
        };
        let formatted = Diagnostic::new(&err).format();
        assert!(formatted.contains("Syntax Error"));
        assert!(formatted.contains("unterminated string literal"));
        assert!(formatted.contains("kept unminified"));
    }

    #[test]
    fn test_diagnostic_with_source() {
        colored::control::set_override(false);
        let source = "local x = 42\nlocal y = 'oops\nlocal z = 10";
        let err = MinifyError::UnterminatedString {
            location: SourceLocation::at(2, 11),
        };
        let formatted = Diagnostic::with_source(&err, source).format();

        assert!(formatted.contains("local x = 42"));
        assert!(formatted.contains("local y = 'oops"));
        assert!(formatted.contains("local z = 10"));
        // "  2 " is four columns wide, the quote sits ten characters further in
        assert!(formatted.contains(&format!("\n{}^\n", " ".repeat(14))));
    }

    #[test]
    fn test_diagnostic_for_invalid_mode_has_no_context() {
        let err = MinifyError::InvalidMode { value: 3, max: 2 };
        let formatted = Diagnostic::with_source(&err, "print(1)").format();
        assert!(formatted.contains("Internal Error"));
        assert!(!formatted.contains("print(1)"));
    }
}
