//! Build configuration
//!
//! The paths and layout are fixed constants resolved against a base
//! directory; there is no configuration file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::templates::Layout;

/// Directory holding the Markdown sources, relative to the base directory
pub const DEFAULT_INPUT_DIR: &str = "pre-article";

/// Directory receiving the rendered pages, relative to the base directory
pub const DEFAULT_OUTPUT_DIR: &str = "article";

/// Layout applied to every page
pub const DEFAULT_LAYOUT: Layout = Layout::Github;

/// Configuration for one clean/build invocation
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Markdown source directory
    pub input_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Layout wrapped around every rendered fragment
    pub layout: Layout,
    /// Code block highlighting
    pub highlight: HighlightConfig,
    /// Render a table of contents above the content
    pub toc: bool,
}

impl BuildConfig {
    /// Create the default configuration rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            input_dir: base_dir.join(DEFAULT_INPUT_DIR),
            output_dir: base_dir.join(DEFAULT_OUTPUT_DIR),
            layout: DEFAULT_LAYOUT,
            highlight: HighlightConfig::default(),
            toc: false,
        }
    }

    /// Check that the input directory is usable and that cleaning the
    /// output directory cannot touch the sources
    pub fn validate(&self) -> Result<()> {
        let metadata = fs::metadata(&self.input_dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BuildError::config(format!(
                "Input directory not found: {}",
                self.input_dir.display()
            )),
            _ => BuildError::config(format!(
                "Input directory is not accessible: {}: {}",
                self.input_dir.display(),
                e
            )),
        })?;

        if !metadata.is_dir() {
            return Err(BuildError::config(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        fs::read_dir(&self.input_dir).map_err(|e| {
            BuildError::config(format!(
                "Input directory is not readable: {}: {}",
                self.input_dir.display(),
                e
            ))
        })?;

        self.check_output_dir()
    }

    /// Refuse an output directory that is the input directory or one of
    /// its ancestors
    pub fn check_output_dir(&self) -> Result<()> {
        // Both must exist to overlap
        let (Ok(input), Ok(output)) = (
            self.input_dir.canonicalize(),
            self.output_dir.canonicalize(),
        ) else {
            return Ok(());
        };

        if input.starts_with(&output) {
            return Err(BuildError::config(format!(
                "Output directory {} contains the input directory {}",
                self.output_dir.display(),
                self.input_dir.display()
            )));
        }

        Ok(())
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::new("/site");
        assert_eq!(config.input_dir, PathBuf::from("/site/pre-article"));
        assert_eq!(config.output_dir, PathBuf::from("/site/article"));
        assert_eq!(config.layout, Layout::Github);
        assert!(config.highlight.enable);
        assert!(!config.highlight.line_number);
        assert!(!config.toc);
    }

    #[test]
    fn test_validate_missing_input() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::new(dir.path());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_input_is_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_INPUT_DIR), "# not a dir").unwrap();
        let config = BuildConfig::new(dir.path());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(DEFAULT_INPUT_DIR)).unwrap();
        BuildConfig::new(dir.path()).validate().unwrap();
    }

    #[test]
    fn test_output_containing_input_is_refused() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("docs").join("src");
        fs::create_dir_all(&input).unwrap();

        let mut config = BuildConfig::new(dir.path());
        config.input_dir = input.clone();
        config.output_dir = dir.path().join("docs");
        assert!(matches!(
            config.validate(),
            Err(BuildError::Config { .. })
        ));

        config.output_dir = input;
        assert!(config.check_output_dir().is_err());
    }
}
