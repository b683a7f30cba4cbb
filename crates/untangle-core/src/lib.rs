//! Interval primitives and line/character conversions shared by the
//! untangle crates.

mod span;
mod text;

pub use span::*;
pub use text::*;
