//! Parsers and samplers for Linux `/proc` pseudo-files.

pub mod parser;
pub mod system;
