//! Delegation entities: specialists and the tasks dispatched to them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The five specialist capabilities a task can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
    Terminal,
    Coding,
    Web,
    BuildSystem,
    FileSystem,
}

impl Specialist {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialist::Terminal => "terminal",
            Specialist::Coding => "coding",
            Specialist::Web => "web",
            Specialist::BuildSystem => "build_system",
            Specialist::FileSystem => "file_system",
        }
    }

    /// Parse a specialist name as it appears in planner output.
    /// Accepts a few common spelling variants.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "terminal" | "shell" => Some(Specialist::Terminal),
            "coding" | "code" | "coder" => Some(Specialist::Coding),
            "web" | "browser" => Some(Specialist::Web),
            "build_system" | "build-system" | "build" | "make" => Some(Specialist::BuildSystem),
            "file_system" | "file-system" | "filesystem" | "files" => Some(Specialist::FileSystem),
            _ => None,
        }
    }

    pub fn all() -> &'static [Specialist] {
        &[
            Specialist::Terminal,
            Specialist::Coding,
            Specialist::Web,
            Specialist::BuildSystem,
            Specialist::FileSystem,
        ]
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a task should be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskMode {
    /// Single dispatch to the specialist.
    #[default]
    Direct,
    /// Route through the red/green/refactor cycle (coding tasks only).
    Tdd,
}

/// Lifecycle of a dispatched task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed { reason: String },
}

/// One unit of delegated work.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTask {
    pub id: String,
    pub goal: String,
    pub specialist: Specialist,
    pub mode: TaskMode,
    pub params: HashMap<String, serde_json::Value>,
    pub status: TaskStatus,
    pub output: Option<String>,
}

impl AgentTask {
    pub fn new(id: impl Into<String>, goal: impl Into<String>, specialist: Specialist) -> Self {
        AgentTask {
            id: id.into(),
            goal: goal.into(),
            specialist,
            mode: TaskMode::Direct,
            params: HashMap::new(),
            status: TaskStatus::Pending,
            output: None,
        }
    }

    pub fn with_mode(mut self, mode: TaskMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Fetch a string parameter, if present and a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    pub fn start(&mut self) {
        self.status = TaskStatus::Running;
    }

    pub fn succeed(&mut self, output: impl Into<String>) {
        self.status = TaskStatus::Succeeded;
        self.output = Some(output.into());
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.output = Some(reason.clone());
        self.status = TaskStatus::Failed { reason };
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, TaskStatus::Failed { .. })
    }
}

/// Result of one specialist dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistOutcome {
    pub success: bool,
    pub output: String,
}

impl SpecialistOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        SpecialistOutcome {
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        SpecialistOutcome {
            success: false,
            output: output.into(),
        }
    }
}
