//! Settings and error types shared by the library and the binary

pub mod config;
pub mod error;

pub use config::{QualityPreference, SelectionSettings};
pub use error::FormatError;
