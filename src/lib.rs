//! mds-rs: render a directory of Markdown files into styled HTML pages
//!
//! The pipeline has two explicit steps: an optional clean of the output
//! directory, then a build that renders every Markdown source through a
//! built-in layout.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod templates;

use std::path::Path;

pub use commands::build::BuildSummary;
pub use config::BuildConfig;
pub use error::{BuildError, Result};
pub use templates::Layout;

/// The main application
#[derive(Debug, Clone)]
pub struct Mds {
    /// Build configuration
    pub config: BuildConfig,
}

impl Mds {
    /// Create an instance with the default configuration rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_config(BuildConfig::new(base_dir))
    }

    /// Create an instance from an explicit configuration
    pub fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(&self.config)
    }

    /// Render the sources without cleaning first
    pub fn build(&self) -> Result<BuildSummary> {
        commands::build::run(&self.config)
    }

    /// Validate, clean, then build. Nothing is deleted when the
    /// configuration is unusable.
    pub fn run(&self) -> Result<BuildSummary> {
        self.config.validate()?;
        self.clean()?;
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let relative = e.path().strip_prefix(dir).unwrap().to_path_buf();
                (relative, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_run_removes_stale_pages() {
        let dir = TempDir::new().unwrap();
        let mds = Mds::new(dir.path());
        write(&mds.config.input_dir, "a.md", "# A");
        write(&mds.config.output_dir, "old.html", "stale");

        let summary = mds.run().unwrap();
        assert_eq!(summary.documents, 1);
        assert!(mds.config.output_dir.join("a.html").exists());
        assert!(!mds.config.output_dir.join("old.html").exists());
    }

    #[test]
    fn test_build_alone_keeps_stale_pages() {
        let dir = TempDir::new().unwrap();
        let mds = Mds::new(dir.path());
        write(&mds.config.input_dir, "a.md", "# A");
        write(&mds.config.output_dir, "old.html", "stale");

        mds.build().unwrap();
        assert!(mds.config.output_dir.join("old.html").exists());
    }

    #[test]
    fn test_clean_then_build_matches_fresh_build() {
        let sources = [
            ("a.md", "# A\n\nText with *emphasis*."),
            ("nested/b.md", "## B\n\n- one\n- two\n"),
        ];

        let fresh = TempDir::new().unwrap();
        let fresh_mds = Mds::new(fresh.path());
        for (path, content) in sources {
            write(&fresh_mds.config.input_dir, path, content);
        }
        fresh_mds.build().unwrap();

        let dirty = TempDir::new().unwrap();
        let dirty_mds = Mds::new(dirty.path());
        for (path, content) in sources {
            write(&dirty_mds.config.input_dir, path, content);
        }
        write(&dirty_mds.config.output_dir, "a.html", "outdated");
        write(&dirty_mds.config.output_dir, "gone/page.html", "stale");
        dirty_mds.run().unwrap();

        assert_eq!(
            snapshot(&fresh_mds.config.output_dir),
            snapshot(&dirty_mds.config.output_dir)
        );
    }

    #[test]
    fn test_run_with_missing_input_keeps_output() {
        let dir = TempDir::new().unwrap();
        let mds = Mds::new(dir.path());
        write(&mds.config.output_dir, "old.html", "previous build");

        let err = mds.run().unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
        assert_eq!(
            fs::read_to_string(mds.config.output_dir.join("old.html")).unwrap(),
            "previous build"
        );
    }

    #[test]
    fn test_run_without_output_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = BuildConfig::new(dir.path());
        config.layout = Layout::None;
        let mds = Mds::with_config(config);
        write(&mds.config.input_dir, "a.md", "# Hello");

        mds.run().unwrap();
        let html = fs::read_to_string(mds.config.output_dir.join("a.html")).unwrap();
        assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(!html.contains("markdown-body"));
    }
}
