//! Build file (Makefile) document and target extraction.
//!
//! Target extraction is intentionally shallow: it reads rule lines of the
//! form `name: ...` and ignores recipes, variables, pattern rules, and
//! special targets. The extracted names are only used to ground the
//! interpreter prompt and to sanity-check commands before execution.

use std::path::PathBuf;

/// A loaded build file with its raw content.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFileDocument {
    pub path: PathBuf,
    pub content: String,
}

/// A build target extracted from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    /// Trailing `## comment` on the rule line, the common self-documenting
    /// Makefile convention.
    pub description: Option<String>,
}

impl BuildFileDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        BuildFileDocument {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Extract the targets declared in this document, in order of
    /// appearance, without duplicates.
    pub fn targets(&self) -> Vec<Target> {
        let mut targets: Vec<Target> = Vec::new();
        for line in self.content.lines() {
            // Recipe lines and comments cannot declare targets.
            if line.starts_with('\t') || line.trim_start().starts_with('#') {
                continue;
            }
            let Some(colon) = line.find(':') else {
                continue;
            };
            // `:=`, `::=` etc. are variable assignments.
            if line[colon + 1..].starts_with('=') {
                continue;
            }
            let head = line[..colon].trim();
            if head.is_empty()
                || head.starts_with('.')
                || head.contains(|c: char| c.is_whitespace())
                || head.contains('$')
                || head.contains('%')
                || head.contains('=')
            {
                continue;
            }
            if targets.iter().any(|t| t.name == head) {
                continue;
            }
            let description = line[colon + 1..]
                .split_once("##")
                .map(|(_, doc)| doc.trim().to_string())
                .filter(|doc| !doc.is_empty());
            targets.push(Target {
                name: head.to_string(),
                description,
            });
        }
        targets
    }

    pub fn target_names(&self) -> Vec<String> {
        self.targets().into_iter().map(|t| t.name).collect()
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.targets().iter().any(|t| t.name == name)
    }

    /// One line per target, `name: description` where a description
    /// exists. This is the context handed to the interpreter prompt.
    pub fn render_target_summary(&self) -> String {
        self.targets()
            .iter()
            .map(|t| match &t.description {
                Some(doc) => format!("{}: {}", t.name, doc),
                None => t.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
