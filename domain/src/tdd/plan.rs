//! The TDD step plan and its persisted markdown rendering.

use serde_json::Value;

use crate::core::error::DomainError;
use crate::tdd::machine::TddError;

/// Where a step is in its red/green/refactor progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    NotStarted,
    /// A failing check has been authored and confirmed failing.
    Red,
    /// The implementation made the check pass.
    Green,
    /// Cleanup done, verification still passing. Terminal.
    Refactored,
}

impl StepStatus {
    fn marker(&self) -> &'static str {
        match self {
            StepStatus::NotStarted => "[ ]",
            StepStatus::Red => "[red]",
            StepStatus::Green => "[green]",
            StepStatus::Refactored => "[x]",
        }
    }
}

/// One step of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TddStep {
    pub description: String,
    pub status: StepStatus,
}

/// An ordered, non-empty list of steps toward a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct TddPlan {
    pub goal: String,
    steps: Vec<TddStep>,
}

impl TddPlan {
    pub fn new(goal: impl Into<String>, descriptions: Vec<String>) -> Result<Self, TddError> {
        let steps: Vec<TddStep> = descriptions
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .map(|description| TddStep {
                description,
                status: StepStatus::NotStarted,
            })
            .collect();
        if steps.is_empty() {
            return Err(TddError::EmptyPlan);
        }
        Ok(TddPlan {
            goal: goal.into(),
            steps,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TddStep] {
        &self.steps
    }

    pub(crate) fn step_mut(&mut self, index: usize) -> &mut TddStep {
        &mut self.steps[index]
    }

    /// Render the plan as the markdown checklist persisted between
    /// transitions.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# TDD plan: {}\n\n", self.goal));
        for (index, step) in self.steps.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} {}\n",
                index + 1,
                step.status.marker(),
                step.description
            ));
        }
        out
    }
}

/// Parse a raw planner response (`{"steps": ["..."]}`) into step
/// descriptions for a [`TddPlan`].
pub fn parse_plan_steps(raw: &str) -> Result<Vec<String>, DomainError> {
    let payload = crate::interpret::parsing::strip_code_fences(raw);
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| DomainError::InvalidPlan(format!("not valid JSON: {e}")))?;

    let Some(steps) = value.get("steps").and_then(Value::as_array) else {
        return Err(DomainError::InvalidPlan("missing steps array".to_string()));
    };

    let mut out = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let Some(text) = step.as_str().map(str::trim).filter(|s| !s.is_empty()) else {
            return Err(DomainError::InvalidPlan(format!(
                "step {index} is not a non-empty string"
            )));
        };
        out.push(text.to_string());
    }
    if out.is_empty() {
        return Err(DomainError::InvalidPlan("steps array is empty".to_string()));
    }
    Ok(out)
}
