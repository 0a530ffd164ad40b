//! Conservative minification
//!
//! Drops the shebang and comments and squeezes whitespace runs, but keeps a
//! newline wherever the script had one so line structure survives. Literal
//! regions are copied verbatim.

use std::iter;

use super::{normalize_trailing_newlines, Minified};
use crate::error::MinifyResult;
use crate::lexer::matcher::is_newline;
use crate::lexer::{Lexer, RegionKind};

/// Run the conservative pass, falling back to the original on a bad string
pub fn conservative(source: &str) -> Minified {
    match strip(source) {
        Ok(text) => Minified::success(text),
        Err(fault) => Minified::fallback(source, fault),
    }
}

fn strip(source: &str) -> MinifyResult<String> {
    let mut out = String::with_capacity(source.len());

    for region in Lexer::new(source) {
        let region = region?;
        let text = region.text(source);

        match region.kind {
            RegionKind::Shebang | RegionKind::LineComment => {}
            RegionKind::LongComment { .. } => {
                push_separator(&mut out, text.matches('\n').count());
            }
            RegionKind::Whitespace => {
                if out.is_empty() {
                    continue;
                }
                let newlines = usize::from(text.bytes().any(is_newline));
                push_separator(&mut out, newlines);
            }
            RegionKind::String
            | RegionKind::LongString { .. }
            | RegionKind::Word
            | RegionKind::Symbol => out.push_str(text),
        }
    }

    normalize_trailing_newlines(&mut out);
    Ok(out)
}

/// Emit the gap left by removed whitespace or a long comment.
///
/// With no line breaks to keep this is a single space, merged into whatever
/// separator was already emitted. Otherwise exactly `newlines` line breaks are
/// emitted, replacing a dangling space.
fn push_separator(out: &mut String, newlines: usize) {
    if newlines == 0 {
        if !out.is_empty() && !out.ends_with([' ', '\n']) {
            out.push(' ');
        }
        return;
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out.extend(iter::repeat('\n').take(newlines));
}
