//! Scripted port implementations shared by use case tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nlmake_domain::{
    AgentTask, BuildFileDocument, HumanDecision, Interpretation, Specialist, SpecialistOutcome,
    TaskSpec, VerificationOutcome,
};

use crate::ports::{
    BuildFileError, BuildFilePort, BuildRunnerPort, CommandOutcome, ConfirmationError,
    ConfirmationPort, InterpretationError, InterpretationRequest, InterpreterPort,
    PlanArtifactStore, PlannerPort, RunnerError, Selection, SelectionError, SelectionPort,
    SpecialistPort, VerificationPort,
};

pub fn command_outcome(exit_code: i32) -> CommandOutcome {
    CommandOutcome {
        stdout: String::new(),
        stderr: String::new(),
        exit_code,
        duration: Duration::from_millis(5),
    }
}

/// Replays a queue of interpretation results and records the requests.
pub struct ScriptedInterpreter {
    responses: Mutex<VecDeque<Result<Interpretation, InterpretationError>>>,
    pub requests: Mutex<Vec<InterpretationRequest>>,
}

impl ScriptedInterpreter {
    pub fn new(responses: Vec<Result<Interpretation, InterpretationError>>) -> Self {
        ScriptedInterpreter {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InterpreterPort for ScriptedInterpreter {
    async fn interpret(
        &self,
        request: InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(InterpretationError::ServiceUnavailable(
                    "script exhausted".to_string(),
                ))
            })
    }
}

/// Fixed planner results for decomposition and step planning.
pub struct ScriptedPlanner {
    pub tasks: Result<Vec<TaskSpec>, InterpretationError>,
    pub steps: Result<Vec<String>, InterpretationError>,
}

impl ScriptedPlanner {
    pub fn with_tasks(tasks: Vec<TaskSpec>) -> Self {
        ScriptedPlanner {
            tasks: Ok(tasks),
            steps: Ok(vec![]),
        }
    }

    pub fn with_steps(steps: Vec<&str>) -> Self {
        ScriptedPlanner {
            tasks: Ok(vec![]),
            steps: Ok(steps.into_iter().map(String::from).collect()),
        }
    }
}

#[async_trait]
impl PlannerPort for ScriptedPlanner {
    async fn decompose(
        &self,
        _goal: &str,
        _context: &str,
    ) -> Result<Vec<TaskSpec>, InterpretationError> {
        self.tasks.clone()
    }

    async fn plan_steps(
        &self,
        _goal: &str,
        _context: &str,
    ) -> Result<Vec<String>, InterpretationError> {
        self.steps.clone()
    }
}

/// A specialist that replays scripted outcomes and records goals.
pub struct StubSpecialist {
    specialist: Specialist,
    mutating: bool,
    outcomes: Mutex<VecDeque<SpecialistOutcome>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubSpecialist {
    pub fn new(specialist: Specialist, mutating: bool) -> Self {
        StubSpecialist {
            specialist,
            mutating,
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn scripted(mut self, outcomes: Vec<SpecialistOutcome>) -> Self {
        self.outcomes = Mutex::new(outcomes.into());
        self
    }
}

#[async_trait]
impl SpecialistPort for StubSpecialist {
    fn specialist(&self) -> Specialist {
        self.specialist
    }

    fn mutates_state(&self) -> bool {
        self.mutating
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        self.calls.lock().unwrap().push(task.goal.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| SpecialistOutcome::success("ok"))
    }
}

/// Scripted confirmation gate that records every prompt it was asked.
pub struct ScriptedConfirmation {
    pub task_decision: HumanDecision,
    pub correction_decision: HumanDecision,
    pub plan_decision: HumanDecision,
    pub cleanup_decision: HumanDecision,
    pub events: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn approving() -> Self {
        ScriptedConfirmation {
            task_decision: HumanDecision::Approve,
            correction_decision: HumanDecision::Approve,
            plan_decision: HumanDecision::Approve,
            cleanup_decision: HumanDecision::Approve,
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConfirmationPort for ScriptedConfirmation {
    async fn confirm_task(&self, task: &AgentTask) -> Result<HumanDecision, ConfirmationError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("confirm_task:{}", task.id));
        Ok(self.task_decision)
    }

    async fn confirm_correction(
        &self,
        suggested: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("confirm_correction:{suggested}"));
        Ok(self.correction_decision)
    }

    async fn approve_plan(
        &self,
        _rendered_plan: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        self.events.lock().unwrap().push("approve_plan".to_string());
        Ok(self.plan_decision)
    }

    async fn approve_cleanup(
        &self,
        _artifact_path: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        self.events
            .lock()
            .unwrap()
            .push("approve_cleanup".to_string());
        Ok(self.cleanup_decision)
    }
}

/// Fixed selection result.
pub struct ScriptedSelection(pub Selection);

#[async_trait]
impl SelectionPort for ScriptedSelection {
    async fn select(
        &self,
        _prompt: &str,
        _candidates: &[String],
    ) -> Result<Selection, SelectionError> {
        Ok(self.0)
    }
}

/// Records run targets and replays scripted outcomes.
pub struct RecordingRunner {
    outcomes: Mutex<VecDeque<CommandOutcome>>,
    pub targets: Mutex<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner {
            outcomes: Mutex::new(VecDeque::new()),
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn scripted(outcomes: Vec<CommandOutcome>) -> Self {
        RecordingRunner {
            outcomes: Mutex::new(outcomes.into()),
            targets: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BuildRunnerPort for RecordingRunner {
    async fn run_target(&self, target: &str) -> Result<CommandOutcome, RunnerError> {
        self.targets.lock().unwrap().push(target.to_string());
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| command_outcome(0)))
    }
}

/// Replays a queue of verification outcomes.
pub struct ScriptedVerifier {
    outcomes: Mutex<VecDeque<VerificationOutcome>>,
    pub runs: Mutex<usize>,
}

impl ScriptedVerifier {
    pub fn new(outcomes: Vec<VerificationOutcome>) -> Self {
        ScriptedVerifier {
            outcomes: Mutex::new(outcomes.into()),
            runs: Mutex::new(0),
        }
    }
}

#[async_trait]
impl VerificationPort for ScriptedVerifier {
    async fn verify(&self) -> Result<VerificationOutcome, RunnerError> {
        *self.runs.lock().unwrap() += 1;
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| VerificationOutcome::passed("default pass")))
    }
}

/// In-memory plan artifact store that keeps a history of writes.
pub struct MemoryPlanStore {
    pub writes: Mutex<Vec<String>>,
    pub discarded: Mutex<bool>,
    path: PathBuf,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        MemoryPlanStore {
            writes: Mutex::new(Vec::new()),
            discarded: Mutex::new(false),
            path: PathBuf::from(".nlmake/tdd-plan.md"),
        }
    }
}

impl PlanArtifactStore for MemoryPlanStore {
    fn persist(&self, rendered: &str) -> std::io::Result<()> {
        self.writes.lock().unwrap().push(rendered.to_string());
        Ok(())
    }

    fn discard(&self) -> std::io::Result<()> {
        *self.discarded.lock().unwrap() = true;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Serves a fixed build file document.
pub struct StaticBuildFile(pub BuildFileDocument);

impl StaticBuildFile {
    pub fn sample() -> Self {
        StaticBuildFile(BuildFileDocument::new(
            "Makefile",
            "build: ## Compile\n\tcc -o app main.c\n\ntest: build\n\t./run-tests.sh\n",
        ))
    }
}

impl BuildFilePort for StaticBuildFile {
    fn read(&self) -> Result<BuildFileDocument, BuildFileError> {
        Ok(self.0.clone())
    }
}
