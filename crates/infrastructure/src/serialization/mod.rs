//! Deterministic JSON serialization for exported collection files.
//!
//! Exported files diff cleanly between runs:
//! - Object keys keep declaration order, extra fields are sorted (`BTreeMap`)
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::*;
