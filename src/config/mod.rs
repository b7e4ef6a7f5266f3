//! Configuration module

mod build;

pub use build::BuildConfig;
pub use build::HighlightConfig;
pub use build::{DEFAULT_INPUT_DIR, DEFAULT_LAYOUT, DEFAULT_OUTPUT_DIR};
