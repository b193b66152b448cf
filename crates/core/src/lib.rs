//! Domain primitives shared across the showcase workspace.

pub mod error;
pub mod fields;
pub mod patch;
pub mod types;
