//! Build errors

use std::path::PathBuf;

/// Errors that can occur while cleaning or building
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configuration cannot be used; reported before any side effects
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A single document failed to render
    #[error("Failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    /// Reading or writing the filesystem failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn config(message: impl Into<String>) -> Self {
        BuildError::Config {
            message: message.into(),
        }
    }

    pub fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        BuildError::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
