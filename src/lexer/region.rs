//! Lexical region definitions
//!
//! The minifier never builds a token stream. It only needs to know which
//! stretch of the script belongs to which lexical category, so a region is
//! just a kind and a byte span into the original text.

use std::fmt;
use std::ops::Range;

/// A classified span of a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Region {
    /// Create a new region
    pub fn new(kind: RegionKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Byte range of the region
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this region covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span()]
    }

    /// Whether the interior of this region must survive minification untouched
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, RegionKind::String | RegionKind::LongString { .. })
    }
}

/// Lexical categories the scanner distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// `#!` interpreter line at the very start of the script
    Shebang,
    /// Quoted string literal, `"..."` or `'...'`
    String,
    /// `[==[ ... ]==]` long string
    LongString { level: usize },
    /// `--[==[ ... ]==]` long comment
    LongComment { level: usize },
    /// `--` through end of line
    LineComment,
    /// Run of spaces, tabs, carriage returns and newlines
    Whitespace,
    /// Identifier or keyword
    Word,
    /// Anything else, one character at a time
    Symbol,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shebang => write!(f, "shebang"),
            Self::String => write!(f, "string"),
            Self::LongString { level } => write!(f, "long-string({})", level),
            Self::LongComment { level } => write!(f, "long-comment({})", level),
            Self::LineComment => write!(f, "comment"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Word => write!(f, "word"),
            Self::Symbol => write!(f, "symbol"),
        }
    }
}
