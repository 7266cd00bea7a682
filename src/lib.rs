//! ytformats library
//!
//! Deterministic lookup, filtering and ranking over the format variants a
//! media source exposes.

pub mod format;
pub mod utils;

// Re-export main types for easier use
pub use format::{Format, FormatList, FormatSelector};
pub use utils::{FormatError, QualityPreference, SelectionSettings};
