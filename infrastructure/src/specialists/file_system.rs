//! File system specialist: read, write, and list files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use nlmake_application::ports::SpecialistPort;
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

/// Cap on file content returned to the manager (1 MB).
const MAX_READ_SIZE: u64 = 1024 * 1024;

pub struct FileSystemSpecialist {
    root: PathBuf,
}

impl FileSystemSpecialist {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSystemSpecialist { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }
}

#[async_trait]
impl SpecialistPort for FileSystemSpecialist {
    fn specialist(&self) -> Specialist {
        Specialist::FileSystem
    }

    fn mutates_state(&self) -> bool {
        true
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        let Some(operation) = task.get_string("operation") else {
            return SpecialistOutcome::failure(
                "file system task needs an 'operation' param (read, write, or list)",
            );
        };
        let Some(path) = task.get_string("path") else {
            return SpecialistOutcome::failure("file system task needs a 'path' param");
        };
        let resolved = self.resolve(path);

        match operation {
            "read" => match std::fs::metadata(&resolved) {
                Ok(meta) if meta.len() > MAX_READ_SIZE => {
                    SpecialistOutcome::failure(format!("{path} is too large to read"))
                }
                _ => match std::fs::read_to_string(&resolved) {
                    Ok(content) => SpecialistOutcome::success(content),
                    Err(e) => SpecialistOutcome::failure(format!("could not read {path}: {e}")),
                },
            },
            "write" => {
                let Some(content) = task.get_string("content") else {
                    return SpecialistOutcome::failure("write needs a 'content' param");
                };
                if let Some(parent) = resolved.parent()
                    && let Err(e) = std::fs::create_dir_all(parent)
                {
                    return SpecialistOutcome::failure(format!("could not create {path}: {e}"));
                }
                match std::fs::write(&resolved, content) {
                    Ok(()) => SpecialistOutcome::success(format!(
                        "wrote {} bytes to {path}",
                        content.len()
                    )),
                    Err(e) => SpecialistOutcome::failure(format!("could not write {path}: {e}")),
                }
            }
            "list" => match std::fs::read_dir(&resolved) {
                Ok(entries) => {
                    let mut names: Vec<String> = entries
                        .filter_map(|e| e.ok())
                        .map(|e| e.file_name().to_string_lossy().into_owned())
                        .collect();
                    names.sort();
                    SpecialistOutcome::success(names.join("\n"))
                }
                Err(e) => SpecialistOutcome::failure(format!("could not list {path}: {e}")),
            },
            other => SpecialistOutcome::failure(format!("unknown operation '{other}'")),
        }
    }
}
