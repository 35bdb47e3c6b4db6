//! Plan artifact store
//!
//! Persists the rendered TDD plan between phase transitions so an
//! interrupted run leaves an inspectable artifact on disk. Writes must be
//! atomic: a crash mid-write may never leave a torn artifact.

use std::path::Path;

pub trait PlanArtifactStore: Send + Sync {
    /// Atomically replace the artifact with this rendering.
    fn persist(&self, rendered: &str) -> std::io::Result<()>;

    /// Remove the artifact. Missing artifacts are not an error.
    fn discard(&self) -> std::io::Result<()>;

    fn path(&self) -> &Path;
}
