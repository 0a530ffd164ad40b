//! Anchored matchers for the lexical regions the minifier cares about
//!
//! Every matcher looks at a byte offset into the script and either returns the
//! region that starts exactly there or `None`. They hold no state, so the
//! scanners call them directly instead of sharing precompiled patterns.
//!
//! All delimiters are ASCII, which keeps every returned boundary on a UTF-8
//! character boundary even when the script contains multi-byte text.

use super::region::{Region, RegionKind};

/// Letters, digits and underscore
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Space, tab, carriage return or newline
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Carriage return or newline
pub fn is_newline(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}

/// `#!` line at the very start of the script, up to but excluding the newline
pub fn match_shebang(text: &str) -> Option<Region> {
    if !text.starts_with("#!") {
        return None;
    }
    let end = text.find('\n').unwrap_or(text.len());
    Some(Region::new(RegionKind::Shebang, 0, end))
}

/// Quoted string literal starting at `at`.
///
/// A backslash escapes whatever follows it, so `\"` and `\\` never close the
/// literal. A raw line break, escaped or not, ends the match unsuccessfully.
pub fn match_string(text: &str, at: usize) -> Option<Region> {
    let bytes = text.as_bytes();
    let quote = *bytes.get(at)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let mut i = at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => match bytes.get(i + 1) {
                Some(&b) if !is_newline(b) => i += 2,
                _ => return None,
            },
            b if is_newline(b) => return None,
            b if b == quote => return Some(Region::new(RegionKind::String, at, i + 1)),
            _ => i += 1,
        }
    }
    None
}

/// Level of a long-bracket opener `[`, `=`*N, `[` at `at`
fn opening_level(bytes: &[u8], at: usize) -> Option<usize> {
    if bytes.get(at) != Some(&b'[') {
        return None;
    }
    let level = bytes[at + 1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(at + 1 + level) == Some(&b'[')).then_some(level)
}

/// End offset of the first `]`, `=`*level, `]` at or after `from`
fn find_closer(bytes: &[u8], from: usize, level: usize) -> Option<usize> {
    let mut i = from;
    while let Some(offset) = bytes.get(i..)?.iter().position(|&b| b == b']') {
        let j = i + offset;
        let equals = bytes[j + 1..].iter().take_while(|&&b| b == b'=').count();
        if equals == level && bytes.get(j + 1 + level) == Some(&b']') {
            return Some(j + level + 2);
        }
        i = j + 1;
    }
    None
}

/// Long string `[==[ ... ]==]` starting at `at`.
///
/// The closer must repeat the opener's level exactly, and the first closer
/// that does wins.
pub fn match_long_bracket(text: &str, at: usize) -> Option<Region> {
    let bytes = text.as_bytes();
    let level = opening_level(bytes, at)?;
    let end = find_closer(bytes, at + level + 2, level)?;
    Some(Region::new(RegionKind::LongString { level }, at, end))
}

/// Long comment `--[==[ ... ]==]` starting at `at`
pub fn match_long_comment(text: &str, at: usize) -> Option<Region> {
    if !text.get(at..)?.starts_with("--") {
        return None;
    }
    let bracket = match_long_bracket(text, at + 2)?;
    let level = match bracket.kind {
        RegionKind::LongString { level } => level,
        _ => return None,
    };
    Some(Region::new(RegionKind::LongComment { level }, at, bracket.end))
}

/// `--` comment running up to, but not including, the next line break
pub fn match_line_comment(text: &str, at: usize) -> Option<Region> {
    if !text.get(at..)?.starts_with("--") {
        return None;
    }
    let end = text.as_bytes()[at..]
        .iter()
        .position(|&b| is_newline(b))
        .map_or(text.len(), |offset| at + offset);
    Some(Region::new(RegionKind::LineComment, at, end))
}

/// Identifier or keyword starting at `at`
pub fn match_word(text: &str, at: usize) -> Option<Region> {
    let bytes = text.as_bytes();
    if !is_word_start(*bytes.get(at)?) {
        return None;
    }
    let len = bytes[at..]
        .iter()
        .take_while(|&&b| is_word_char(b as char))
        .count();
    Some(Region::new(RegionKind::Word, at, at + len))
}

/// First maximal whitespace run at or after `from`.
///
/// Unlike the other matchers this one is not anchored, so callers must check
/// that the run actually begins where they expect.
pub fn find_whitespace(text: &str, from: usize) -> Option<Region> {
    let bytes = text.as_bytes();
    let start = from + bytes.get(from..)?.iter().position(|&b| is_whitespace(b))?;
    let len = bytes[start..].iter().take_while(|&&b| is_whitespace(b)).count();
    Some(Region::new(RegionKind::Whitespace, start, start + len))
}
