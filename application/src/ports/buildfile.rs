//! Build file port
//!
//! Locates and reads the project build file. Reading is synchronous; the
//! file is small and loaded once per turn.

use nlmake_domain::BuildFileDocument;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildFileError {
    #[error("No build file found in {0}")]
    NotFound(String),

    #[error("Could not read build file: {0}")]
    Io(String),
}

/// Port for build file discovery and loading.
pub trait BuildFilePort: Send + Sync {
    fn read(&self) -> Result<BuildFileDocument, BuildFileError>;
}
