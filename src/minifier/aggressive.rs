//! Aggressive minification
//!
//! A second scan over the conservative output that removes every remaining
//! whitespace run unless dropping it would merge two tokens into one.

use super::conservative::conservative;
use super::{normalize_trailing_newlines, Minified};
use crate::lexer::matcher::{self, is_word_char};

/// Run the conservative pass, then squeeze out all optional whitespace.
///
/// When the conservative pass had to give up, its fallback is returned as is.
pub fn aggressive(source: &str) -> Minified {
    let first = conservative(source);
    if !first.is_success() {
        return first;
    }
    Minified::success(Compressor::new(&first.text).compress())
}

/// Cursor over conservatively minified text
struct Compressor<'a> {
    source: &'a str,
    current: usize,
    out: String,
}

impl<'a> Compressor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            current: 0,
            out: String::with_capacity(source.len()),
        }
    }

    fn compress(mut self) -> String {
        while let Some(b) = self.peek() {
            let start = self.current;
            match b {
                b'\'' | b'"' | b'[' => {
                    match matcher::match_string(self.source, start)
                        .or_else(|| matcher::match_long_bracket(self.source, start))
                    {
                        Some(literal) => self.copy_to(literal.end),
                        None => self.copy_char(),
                    }
                }
                b if matcher::is_whitespace(b) => {
                    let end = matcher::find_whitespace(self.source, start)
                        .map_or(start + 1, |run| run.end);
                    self.join(end);
                }
                _ => match matcher::match_word(self.source, start) {
                    Some(word) => self.copy_to(word.end),
                    None => self.copy_char(),
                },
            }
        }

        normalize_trailing_newlines(&mut self.out);
        self.out
    }

    /// Replace the whitespace up to `end` with a space if one is still needed
    fn join(&mut self, end: usize) {
        let prev = self.out.chars().next_back();
        let next = self.source[end..].chars().next();
        if let (Some(prev), Some(next)) = (prev, next) {
            if needs_space(prev, next) {
                self.out.push(' ');
            }
        }
        self.current = end;
    }

    fn copy_to(&mut self, end: usize) {
        self.out.push_str(&self.source[self.current..end]);
        self.current = end;
    }

    fn copy_char(&mut self) {
        if let Some(c) = self.source[self.current..].chars().next() {
            self.out.push(c);
            self.current += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }
}

/// Whether `prev` and `next` would lex differently once adjacent.
///
/// Two word characters would fuse into one identifier. The symbol pairs open
/// a comment (`--`), a long bracket (`[[`, `[=`), or extend a numeral or
/// concatenation into a malformed number (`1..`, `x...`).
fn needs_space(prev: char, next: char) -> bool {
    if is_word_char(prev) && is_word_char(next) {
        return true;
    }
    match (prev, next) {
        ('-', '-') | ('[', '[') | ('[', '=') => true,
        (p, '.') => is_word_char(p) || p == '.',
        _ => false,
    }
}
