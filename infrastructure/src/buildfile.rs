//! Build file discovery and loading.

use std::path::PathBuf;

use tracing::debug;

use nlmake_application::ports::{BuildFileError, BuildFilePort};
use nlmake_domain::BuildFileDocument;

/// GNU make's lookup order.
const CANDIDATE_NAMES: &[&str] = &["Makefile", "makefile", "GNUmakefile"];

/// Reads the project Makefile from a directory, trying the standard names
/// in make's own order.
pub struct MakefileReader {
    directory: PathBuf,
}

impl MakefileReader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        MakefileReader {
            directory: directory.into(),
        }
    }

    pub fn current_dir() -> Self {
        MakefileReader {
            directory: PathBuf::from("."),
        }
    }
}

impl BuildFilePort for MakefileReader {
    fn read(&self) -> Result<BuildFileDocument, BuildFileError> {
        for name in CANDIDATE_NAMES {
            let path = self.directory.join(name);
            if path.is_file() {
                debug!(path = %path.display(), "build file found");
                let content =
                    std::fs::read_to_string(&path).map_err(|e| BuildFileError::Io(e.to_string()))?;
                return Ok(BuildFileDocument::new(path, content));
            }
        }
        Err(BuildFileError::NotFound(
            self.directory.display().to_string(),
        ))
    }
}
