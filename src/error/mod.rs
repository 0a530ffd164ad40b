//! Error handling and diagnostics for the minifier
//!
//! This module provides the error type shared by the scanner, the strategy
//! selector and the host facade, plus source locations for reporting.

use std::fmt;

use thiserror::Error;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for minifier operations
pub type MinifyResult<T> = Result<T, MinifyError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in characters)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }

    /// Resolve a byte offset into `text` to a line and column.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text[..floor_char_boundary(text, offset)];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self::at(line, column)
    }

    /// Attach a filename to this location
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Main error type for the minifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinifyError {
    /// A quote opened a string literal that never closes on its line.
    ///
    /// The conservative pass gives up and hands back the original script.
    #[error("unterminated string literal at {location}")]
    UnterminatedString { location: SourceLocation },

    /// The script format selector is outside the known modes.
    ///
    /// Configuration is expected to reject such values before they get here,
    /// so this is a defect in the caller rather than in the script.
    #[error("script format should not be {value}, expecting 0 to {max}")]
    InvalidMode { value: i64, max: u8 },
}

impl MinifyError {
    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::UnterminatedString { .. } => "Syntax Error",
            Self::InvalidMode { .. } => "Internal Error",
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::UnterminatedString { location } => Some(location),
            Self::InvalidMode { .. } => None,
        }
    }

    /// Whether the error is the fatal configuration defect
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidMode { .. })
    }

    /// Attach a filename to the location carried by this error, if any
    pub fn with_filename(self, filename: &str) -> Self {
        match self {
            Self::UnterminatedString { location } => Self::UnterminatedString {
                location: location.with_filename(filename),
            },
            other => other,
        }
    }
}
