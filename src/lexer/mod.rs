//! Lexical analysis module
//!
//! This module classifies script text into the regions the minifier treats
//! differently: literals, comments, whitespace, words and everything else.

pub mod matcher;
pub mod region;
pub mod scanner;

pub use region::{Region, RegionKind};
pub use scanner::Lexer;
