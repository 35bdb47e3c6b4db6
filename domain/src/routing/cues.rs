//! Task-cue detection for delegation routing.
//!
//! When interpretation yields nothing executable, the router still delegates
//! to the agent pipeline if the request reads like a multi-step task. The cue
//! list is a fixed set of imperative verbs; matching is on whole words,
//! case-insensitive.

const TASK_CUE_VERBS: &[&str] = &[
    "add",
    "build",
    "change",
    "convert",
    "create",
    "delete",
    "fix",
    "generate",
    "implement",
    "install",
    "migrate",
    "move",
    "refactor",
    "remove",
    "rename",
    "rewrite",
    "set",
    "setup",
    "update",
    "upgrade",
    "write",
];

/// Whether the request text contains at least one task-cue verb.
pub fn has_task_cues(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| {
            let lower = word.to_lowercase();
            TASK_CUE_VERBS.contains(&lower.as_str())
        })
}
