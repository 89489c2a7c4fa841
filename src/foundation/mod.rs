//! Shared value types, error taxonomy and textual parsers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod parse;
