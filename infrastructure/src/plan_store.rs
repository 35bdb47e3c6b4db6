//! File-backed plan artifact store.
//!
//! Writes go to a sibling temp file first and are renamed into place, so
//! the artifact on disk is always a complete rendering.

use std::path::{Path, PathBuf};

use nlmake_application::ports::PlanArtifactStore;

pub struct FilePlanStore {
    path: PathBuf,
}

impl FilePlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilePlanStore { path: path.into() }
    }
}

impl PlanArtifactStore for FilePlanStore {
    fn persist(&self, rendered: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("md.tmp");
        std::fs::write(&temp, rendered)?;
        std::fs::rename(&temp, &self.path)
    }

    fn discard(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePlanStore::new(dir.path().join(".nlmake/tdd-plan.md"));
        store.persist("# TDD plan: one\n").unwrap();
        store.persist("# TDD plan: two\n").unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "# TDD plan: two\n");
        // No temp file left behind.
        assert!(!store.path().with_extension("md.tmp").exists());
    }

    #[test]
    fn test_discard_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePlanStore::new(dir.path().join("plan.md"));
        store.persist("x").unwrap();
        store.discard().unwrap();
        store.discard().unwrap();
        assert!(!store.path().exists());
    }
}
