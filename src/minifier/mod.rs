//! Minification strategies
//!
//! Three strategies share one contract: take the full script text and return
//! the text to store, together with the fault that forced a fallback if any.
//! - `pass_through`: the script unchanged
//! - `conservative`: no comments, shebang or redundant whitespace, lines kept
//! - `aggressive`: conservative, then every whitespace run that does not
//!   separate two tokens removed

use std::fmt;

use crate::error::{MinifyError, MinifyResult};

pub mod aggressive;
pub mod conservative;

pub use aggressive::aggressive;
pub use conservative::conservative;

/// Script format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Mode {
    /// Store the script as written
    PassThrough,
    /// Strip comments and redundant whitespace, keeping line breaks
    #[default]
    Conservative,
    /// Strip everything that does not change how the script lexes
    Aggressive,
}

impl Mode {
    /// Every mode, ordered by index
    pub const ALL: [Mode; 3] = [Mode::PassThrough, Mode::Conservative, Mode::Aggressive];

    /// Resolve a raw configuration value.
    ///
    /// Anything outside `0..=2` is a configuration defect and is reported
    /// rather than mapped onto some default.
    pub fn from_index(value: i64) -> MinifyResult<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(MinifyError::InvalidMode {
                value,
                max: (Self::ALL.len() - 1) as u8,
            })
    }

    /// Index used by configuration
    pub fn index(self) -> u8 {
        match self {
            Self::PassThrough => 0,
            Self::Conservative => 1,
            Self::Aggressive => 2,
        }
    }

    /// Run this mode's strategy over `source`
    pub fn apply(self, source: &str) -> Minified {
        match self {
            Self::PassThrough => pass_through(source),
            Self::Conservative => conservative(source),
            Self::Aggressive => aggressive(source),
        }
    }
}

impl TryFrom<i64> for Mode {
    type Error = MinifyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "none"),
            Self::Conservative => write!(f, "conservative"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// Outcome of a single minification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minified {
    /// Text to store: minified on success, the original otherwise
    pub text: String,
    /// Why the strategy fell back to the original text
    pub fault: Option<MinifyError>,
}

impl Minified {
    pub(crate) fn success(text: String) -> Self {
        Self { text, fault: None }
    }

    pub(crate) fn fallback(source: &str, fault: MinifyError) -> Self {
        Self {
            text: source.to_string(),
            fault: Some(fault),
        }
    }

    pub fn is_success(&self) -> bool {
        self.fault.is_none()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Return the script unchanged
pub fn pass_through(source: &str) -> Minified {
    Minified::success(source.to_string())
}

/// Minify `source` with the given mode
pub fn minify(source: &str, mode: Mode) -> Minified {
    mode.apply(source)
}

/// Minify `source` with a raw mode index straight from configuration
pub fn minify_with_index(source: &str, index: i64) -> MinifyResult<Minified> {
    Ok(minify(source, Mode::from_index(index)?))
}

/// Lengths of a script under each strategy, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original: usize,
    pub conservative: usize,
    pub aggressive: usize,
}

impl SizeReport {
    /// Run every strategy over `source` and record the resulting lengths
    pub fn measure(source: &str) -> Self {
        Self {
            original: source.len(),
            conservative: conservative(source).text.len(),
            aggressive: aggressive(source).text.len(),
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minified {} to {}, and {}",
            self.original, self.conservative, self.aggressive
        )
    }
}

/// Make the text end in exactly one newline, dropping trailing blanks
pub(crate) fn normalize_trailing_newlines(out: &mut String) {
    let kept = out.trim_end_matches([' ', '\n']).len();
    out.truncate(kept);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = "#!/usr/bin/env lua\n\
        -- greet everyone\n\
        local names = { 'ann', \"bo  b\" }\n\
        \n\
        --[==[\n\
        loop over the names\n\
        ]==]\n\
        for _, name in ipairs(names) do\n\
        \tprint('hello ' .. name)   -- say it\n\
        end\n\n\n";

    #[test]
    fn test_mode_from_index() {
        assert_eq!(Mode::from_index(0), Ok(Mode::PassThrough));
        assert_eq!(Mode::from_index(1), Ok(Mode::Conservative));
        assert_eq!(Mode::from_index(2), Ok(Mode::Aggressive));
        assert_eq!(
            Mode::from_index(3),
            Err(MinifyError::InvalidMode { value: 3, max: 2 })
        );
        assert_eq!(
            Mode::try_from(-1_i64),
            Err(MinifyError::InvalidMode { value: -1, max: 2 })
        );
    }

    #[test]
    fn test_mode_index_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(i64::from(mode.index())), Ok(mode));
        }
    }

    #[test]
    fn test_pass_through_is_identity() {
        for source in ["", SCRIPT, "local x = \"unterminated", "\r\n\t "] {
            let result = minify(source, Mode::PassThrough);
            assert!(result.is_success());
            assert_eq!(result.text, source);
        }
    }

    #[test]
    fn test_conservative_script() {
        let result = minify(SCRIPT, Mode::Conservative);
        assert!(result.is_success());
        assert_eq!(
            result.text,
            "local names = { 'ann', \"bo  b\" }\n\
            \n\n\n\
            for _, name in ipairs(names) do\n\
            print('hello ' .. name)\n\
            end\n"
        );
    }

    #[test]
    fn test_aggressive_script() {
        let result = minify(SCRIPT, Mode::Aggressive);
        assert!(result.is_success());
        assert_eq!(
            result.text,
            "local names={'ann',\"bo  b\"}for _,name in ipairs(names)do print('hello '..name)end\n"
        );
    }

    #[test]
    fn test_invalid_index_is_an_error() {
        assert_eq!(
            minify_with_index("print(1)", 5),
            Err(MinifyError::InvalidMode { value: 5, max: 2 })
        );
        assert_eq!(
            minify_with_index("print(1)", 2).map(Minified::into_text),
            Ok("print(1)\n".to_string())
        );
    }

    #[test]
    fn test_literal_contents_preserved() {
        let literals = ["\"bo  b\"", "'hello '"];
        for mode in Mode::ALL {
            let result = minify(SCRIPT, mode);
            for literal in literals {
                assert!(result.text.contains(literal), "{} lost {}", mode, literal);
            }
        }
    }

    #[test]
    fn test_failure_returns_original_for_every_mode() {
        let source = "local x = 'a' -- fine\nlocal y = 'broken\n";
        for mode in [Mode::Conservative, Mode::Aggressive] {
            let result = minify(source, mode);
            assert!(!result.is_success());
            assert_eq!(result.text, source);
        }
    }

    #[test]
    fn test_calls_are_isolated_across_threads() {
        let good = "local a = 1 -- one\n";
        let bad = "local b = 'two\n";
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    scope.spawn(move || {
                        let source = if i % 2 == 0 { good } else { bad };
                        (i, minify(source, Mode::Aggressive))
                    })
                })
                .collect();
            for handle in handles {
                let (i, result) = handle.join().unwrap();
                if i % 2 == 0 {
                    assert_eq!(result, Minified::success("local a=1\n".to_string()));
                } else {
                    assert!(!result.is_success());
                    assert_eq!(result.text, bad);
                }
            }
        });
    }

    #[test]
    fn test_size_report() {
        let report = SizeReport::measure(SCRIPT);
        assert_eq!(report.original, SCRIPT.len());
        assert!(report.conservative < report.original);
        assert!(report.aggressive < report.conservative);
        assert_eq!(
            report.to_string(),
            format!(
                "minified {} to {}, and {}",
                report.original, report.conservative, report.aggressive
            )
        );
    }

    #[test]
    fn test_normalize_trailing_newlines() {
        let mut text = String::from("x\n \n\n");
        normalize_trailing_newlines(&mut text);
        assert_eq!(text, "x\n");

        let mut text = String::new();
        normalize_trailing_newlines(&mut text);
        assert_eq!(text, "\n");
    }
}
