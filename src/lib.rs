//! # luamin
//!
//! A minifier for Lua scripts that works purely on lexical structure:
//! - strings and long brackets are copied byte for byte
//! - comments, the shebang and redundant whitespace are dropped
//! - a script it cannot scan is handed back untouched
//!
//! ## Architecture
//!
//! - `lexer`: matchers and a scanner that split a script into regions
//! - `minifier`: the pass-through, conservative and aggressive strategies
//! - `config`: TOML configuration selecting the strategy
//! - `error`: error type and diagnostics

pub mod config;
pub mod error;
pub mod lexer;
pub mod minifier;

use tracing::{debug, error};

// Re-export commonly used types
pub use config::Config;
pub use error::{Diagnostic, MinifyError, MinifyResult, SourceLocation};
pub use lexer::{Lexer, Region, RegionKind};
pub use minifier::{minify, minify_with_index, Minified, Mode, SizeReport};

/// Version of luamin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minify a script as configured and return the bytes to store.
///
/// A script that cannot be minified is stored as written and the failure is
/// logged. Only a configuration with an unknown mode is an error.
pub fn encode_script(source: &str, config: &Config) -> MinifyResult<Vec<u8>> {
    let mode = config.mode()?;

    if config.log_stats {
        debug!("{}", SizeReport::measure(source));
    }

    let result = minify(source, mode);
    if let Some(fault) = &result.fault {
        error!(%fault, "failed to minify the script, likely a syntax error");
    }

    Ok(result.into_text().into_bytes())
}
