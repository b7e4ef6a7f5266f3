//! Source discovery - finds the Markdown documents under the input directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{BuildError, Result};

/// A Markdown file under the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Absolute (or base-relative) path of the file
    pub path: PathBuf,
    /// Path relative to the input directory
    pub relative: PathBuf,
}

impl SourceDocument {
    /// Output path relative to the output directory
    pub fn output_relative(&self) -> PathBuf {
        self.relative.with_extension("html")
    }

    /// Title used when the document has neither front-matter nor a heading
    pub fn fallback_title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// Find every Markdown file under `input_dir`, recursively, in file-name
/// order. Hidden entries and `exclude` (the output directory, when it lives
/// inside the input) are skipped.
pub fn discover(input_dir: &Path, exclude: &Path) -> Result<Vec<SourceDocument>> {
    let mut sources = Vec::new();

    let walker = WalkDir::new(input_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || (!is_hidden(e) && e.path() != exclude));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.to_path_buf());
            BuildError::io(path, e.into())
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(path) {
            continue;
        }

        let relative = path
            .strip_prefix(input_dir)
            .unwrap_or(path)
            .to_path_buf();

        sources.push(SourceDocument {
            path: path.to_path_buf(),
            relative,
        });
    }

    check_output_collisions(&sources)?;

    Ok(sources)
}

/// Two sources must not render to the same page (`a.md` and `a.markdown`)
fn check_output_collisions(sources: &[SourceDocument]) -> Result<()> {
    let mut outputs: HashMap<PathBuf, &SourceDocument> = HashMap::new();
    for source in sources {
        if let Some(previous) = outputs.insert(source.output_relative(), source) {
            return Err(BuildError::config(format!(
                "{} and {} both render to {}",
                previous.relative.display(),
                source.relative.display(),
                source.output_relative().display()
            )));
        }
    }
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
