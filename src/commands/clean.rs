//! Clean the output directory

use std::fs;
use std::io::ErrorKind;

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};

/// Remove the output directory and everything in it; a missing directory
/// is not an error
pub fn run(config: &BuildConfig) -> Result<()> {
    config.check_output_dir()?;

    let output_dir = &config.output_dir;
    let metadata = match fs::symlink_metadata(output_dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Nothing to clean at {:?}", output_dir);
            return Ok(());
        }
        Err(e) => return Err(BuildError::io(output_dir, e)),
    };

    // A symlink is removed itself, never its target
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(output_dir)
    } else {
        fs::remove_file(output_dir)
    };
    removed.map_err(|e| BuildError::io(output_dir, e))?;

    tracing::info!("Deleted: {:?}", output_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_missing_dir() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::new(dir.path());
        run(&config).unwrap();
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_clean_removes_only_output() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::new(dir.path());
        fs::create_dir_all(config.output_dir.join("nested")).unwrap();
        fs::write(config.output_dir.join("old.html"), "stale").unwrap();
        fs::write(config.output_dir.join("nested/deep.html"), "stale").unwrap();
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("sibling.txt"), "keep").unwrap();

        run(&config).unwrap();

        assert!(!config.output_dir.exists());
        assert!(config.input_dir.join("a.md").exists());
        assert!(dir.path().join("sibling.txt").exists());
    }

    #[test]
    fn test_clean_refuses_to_delete_sources() {
        let dir = TempDir::new().unwrap();
        let mut config = BuildConfig::new(dir.path());
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("a.md"), "# A").unwrap();
        config.output_dir = dir.path().to_path_buf();

        assert!(matches!(run(&config), Err(BuildError::Config { .. })));
        assert!(config.input_dir.join("a.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_does_not_follow_symlink() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("elsewhere");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.html"), "keep").unwrap();

        let config = BuildConfig::new(dir.path());
        std::os::unix::fs::symlink(&target, &config.output_dir).unwrap();

        run(&config).unwrap();

        assert!(fs::symlink_metadata(&config.output_dir).is_err());
        assert!(target.join("keep.html").exists());
    }
}
