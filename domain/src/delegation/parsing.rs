//! Parsing of planner responses into task specifications.
//!
//! The planner is asked for strict JSON:
//!
//! ```json
//! {"tasks": [{"specialist": "terminal", "goal": "...", "mode": "direct", "params": {}}]}
//! ```
//!
//! `mode` and `params` are optional. An unknown specialist name or an empty
//! task list rejects the whole decomposition; a half-usable plan is worse
//! than a clean failure the manager can report.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::error::DomainError;
use crate::delegation::entities::{Specialist, TaskMode};
use crate::interpret::parsing::strip_code_fences;

/// A parsed task specification, not yet an [`AgentTask`](crate::delegation::AgentTask).
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub specialist: Specialist,
    pub goal: String,
    pub mode: TaskMode,
    pub params: HashMap<String, Value>,
}

/// Parse a raw planner response into an ordered list of task specs.
pub fn parse_task_specs(raw: &str) -> Result<Vec<TaskSpec>, DomainError> {
    let payload = strip_code_fences(raw);
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| DomainError::InvalidDecomposition(format!("not valid JSON: {e}")))?;

    let Some(tasks) = value.get("tasks").and_then(Value::as_array) else {
        return Err(DomainError::InvalidDecomposition(
            "missing tasks array".to_string(),
        ));
    };
    if tasks.is_empty() {
        return Err(DomainError::InvalidDecomposition(
            "tasks array is empty".to_string(),
        ));
    }

    let mut specs = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let Some(obj) = task.as_object() else {
            return Err(DomainError::InvalidDecomposition(format!(
                "task {index} is not an object"
            )));
        };

        let specialist_name = obj
            .get("specialist")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DomainError::InvalidDecomposition(format!("task {index} has no specialist"))
            })?;
        let specialist = Specialist::parse(specialist_name).ok_or_else(|| {
            DomainError::InvalidDecomposition(format!(
                "task {index} names unknown specialist '{specialist_name}'"
            ))
        })?;

        let goal = obj
            .get("goal")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidDecomposition(format!("task {index} has no goal"))
            })?;

        let mode = match obj.get("mode").and_then(Value::as_str) {
            Some("tdd") => TaskMode::Tdd,
            Some("direct") | None => TaskMode::Direct,
            Some(other) => {
                return Err(DomainError::InvalidDecomposition(format!(
                    "task {index} has unknown mode '{other}'"
                )));
            }
        };

        let params = match obj.get("params") {
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Some(Value::Null) | None => HashMap::new(),
            Some(other) => {
                return Err(DomainError::InvalidDecomposition(format!(
                    "task {index} params must be an object, got {other}"
                )));
            }
        };

        specs.push(TaskSpec {
            specialist,
            goal: goal.to_string(),
            mode,
            params,
        });
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_plan() {
        let specs = parse_task_specs(
            r#"{"tasks": [{"specialist": "terminal", "goal": "list files"}]}"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].specialist, Specialist::Terminal);
        assert_eq!(specs[0].goal, "list files");
        assert_eq!(specs[0].mode, TaskMode::Direct);
    }

    #[test]
    fn test_parse_tdd_mode_and_params() {
        let raw = r#"{"tasks": [
            {"specialist": "coding", "goal": "add a parser", "mode": "tdd",
             "params": {"language": "rust"}}
        ]}"#;
        let specs = parse_task_specs(raw).unwrap();
        assert_eq!(specs[0].mode, TaskMode::Tdd);
        assert_eq!(specs[0].params["language"], serde_json::json!("rust"));
    }

    #[test]
    fn test_parse_preserves_order() {
        let raw = r#"{"tasks": [
            {"specialist": "web", "goal": "look up the docs"},
            {"specialist": "coding", "goal": "write the code"},
            {"specialist": "build_system", "goal": "run the build"}
        ]}"#;
        let specs = parse_task_specs(raw).unwrap();
        let order: Vec<_> = specs.iter().map(|s| s.specialist).collect();
        assert_eq!(
            order,
            vec![Specialist::Web, Specialist::Coding, Specialist::BuildSystem]
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert!(parse_task_specs(r#"{"tasks": []}"#).is_err());
        assert!(parse_task_specs(r#"{"steps": []}"#).is_err());
        assert!(
            parse_task_specs(r#"{"tasks": [{"specialist": "database", "goal": "x"}]}"#).is_err()
        );
        assert!(parse_task_specs(r#"{"tasks": [{"specialist": "web"}]}"#).is_err());
    }

    #[test]
    fn test_parse_strips_fences() {
        let raw = "```json\n{\"tasks\": [{\"specialist\": \"web\", \"goal\": \"fetch\"}]}\n```";
        assert!(parse_task_specs(raw).is_ok());
    }
}
