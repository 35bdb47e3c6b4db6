//! One full turn: read the build file, route the request, and carry the
//! decision to its end.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use nlmake_domain::{
    DelegationReport, Interpretation, Invocation, RoutingDecision, SessionOutcome,
};

use crate::ports::{BuildFilePort, BuildRunnerPort, CommandOutcome};
use crate::use_cases::correct_error::{CorrectErrorUseCase, CorrectionOutcome};
use crate::use_cases::delegate::DelegateUseCase;
use crate::use_cases::disambiguate::DisambiguateUseCase;
use crate::use_cases::route::RouteUseCase;

#[derive(Error, Debug)]
pub enum TurnError {
    #[error(transparent)]
    Router(#[from] crate::use_cases::route::RouterError),

    #[error(transparent)]
    BuildFile(#[from] crate::ports::BuildFileError),

    #[error(transparent)]
    Runner(#[from] crate::ports::RunnerError),

    #[error(transparent)]
    Delegation(#[from] crate::use_cases::delegate::DelegationError),

    #[error(transparent)]
    Correction(#[from] crate::use_cases::correct_error::CorrectionError),

    #[error(transparent)]
    Disambiguation(#[from] crate::use_cases::disambiguate::DisambiguationError),
}

/// What one turn produced, for the presentation layer to render.
#[derive(Debug)]
pub enum TurnOutcome {
    Executed {
        command: String,
        outcome: CommandOutcome,
        /// The interpretation that chose the command, when one did.
        interpretation: Option<Interpretation>,
    },
    Cancelled,
    Delegated(DelegationReport),
    Corrected(CorrectionOutcome),
}

pub struct RunRequestUseCase {
    router: RouteUseCase,
    disambiguation: DisambiguateUseCase,
    delegation: DelegateUseCase,
    correction: CorrectErrorUseCase,
    runner: Arc<dyn BuildRunnerPort>,
    build_file: Arc<dyn BuildFilePort>,
}

impl RunRequestUseCase {
    pub fn new(
        router: RouteUseCase,
        disambiguation: DisambiguateUseCase,
        delegation: DelegateUseCase,
        correction: CorrectErrorUseCase,
        runner: Arc<dyn BuildRunnerPort>,
        build_file: Arc<dyn BuildFilePort>,
    ) -> Self {
        RunRequestUseCase {
            router,
            disambiguation,
            delegation,
            correction,
            runner,
            build_file,
        }
    }

    pub async fn execute(&self, invocation: Invocation) -> Result<TurnOutcome, TurnError> {
        // Captured CLI errors go straight to the correction flow; no build
        // file or interpretation needed to fail cleanly.
        if invocation.is_cli_error() {
            let outcome = self.correction.execute(&invocation).await?;
            return Ok(TurnOutcome::Corrected(outcome));
        }

        let document = self.build_file.read()?;
        let routed = self.router.route(&invocation, &document).await?;
        info!(kind = routed.decision.kind(), "turn routed");

        match routed.decision {
            RoutingDecision::Execute(command) => {
                self.run_command(command, routed.interpretation).await
            }
            RoutingDecision::Disambiguate(candidates) => {
                match self.disambiguation.resolve(candidates).await? {
                    SessionOutcome::Resolved(command) => {
                        self.run_command(command, routed.interpretation).await
                    }
                    SessionOutcome::Cancelled => Ok(TurnOutcome::Cancelled),
                }
            }
            RoutingDecision::Delegate(goal) => {
                let report = self
                    .delegation
                    .execute(&goal, &document.render_target_summary())
                    .await?;
                Ok(TurnOutcome::Delegated(report))
            }
            RoutingDecision::SuggestCorrection { .. } => {
                let outcome = self.correction.execute(&invocation).await?;
                Ok(TurnOutcome::Corrected(outcome))
            }
        }
    }

    async fn run_command(
        &self,
        command: String,
        interpretation: Option<Interpretation>,
    ) -> Result<TurnOutcome, TurnError> {
        let outcome = self.runner.run_target(&command).await?;
        Ok(TurnOutcome::Executed {
            command,
            outcome,
            interpretation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExecutionParams, SafetyConfig};
    use crate::ports::{
        InterpretationError, InterpreterPort, Selection, SpecialistRegistry,
    };
    use crate::use_cases::support::{
        RecordingRunner, ScriptedConfirmation, ScriptedInterpreter, ScriptedPlanner,
        ScriptedSelection, StaticBuildFile, StubSpecialist,
    };
    use nlmake_domain::{Confidence, Interpretation, Specialist, TaskMode, TaskSpec};
    use std::collections::HashMap;
    use std::time::Duration;

    fn interp(command: Option<&str>, confidence: f64, alternatives: &[&str]) -> Interpretation {
        Interpretation::new(
            command.map(String::from),
            Confidence::new(confidence).unwrap(),
            alternatives.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    fn turn(
        interpreter: Arc<dyn InterpreterPort>,
        runner: Arc<RecordingRunner>,
        selection: Selection,
        planner_tasks: Vec<TaskSpec>,
    ) -> RunRequestUseCase {
        let params = ExecutionParams {
            retry_backoff: Duration::from_millis(1),
            ..ExecutionParams::default()
        };
        let confirmation = Arc::new(ScriptedConfirmation::approving());
        let registry = SpecialistRegistry::new()
            .register(Arc::new(StubSpecialist::new(Specialist::Terminal, true)));
        RunRequestUseCase::new(
            RouteUseCase::new(interpreter.clone(), params),
            DisambiguateUseCase::new(Arc::new(ScriptedSelection(selection))),
            DelegateUseCase::new(
                Arc::new(ScriptedPlanner::with_tasks(planner_tasks)),
                registry,
                confirmation.clone(),
                SafetyConfig::default(),
            ),
            CorrectErrorUseCase::new(interpreter, confirmation, runner.clone()),
            runner,
            Arc::new(StaticBuildFile::sample()),
        )
    }

    #[tokio::test]
    async fn test_execute_decision_runs_target() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(
                Some("build"),
                0.95,
                &[],
            ))])),
            runner.clone(),
            Selection::Cancelled,
            vec![],
        );
        let outcome = uc.execute(Invocation::direct("build it")).await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Executed { ref command, .. } if command == "build"));
        assert_eq!(runner.targets.lock().unwrap().as_slice(), ["build"]);
    }

    #[tokio::test]
    async fn test_executed_outcome_carries_interpretation() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(
                Some("build"),
                0.92,
                &[],
            )
            .with_reasoning("matches the build target"))])),
            runner,
            Selection::Cancelled,
            vec![],
        );
        let outcome = uc.execute(Invocation::direct("build it")).await.unwrap();
        let TurnOutcome::Executed { interpretation, .. } = outcome else {
            panic!("expected an execution");
        };
        let interpretation = interpretation.expect("routed executions keep their interpretation");
        assert_eq!(interpretation.confidence.value(), 0.92);
        assert_eq!(
            interpretation.reasoning.as_deref(),
            Some("matches the build target")
        );
    }

    #[tokio::test]
    async fn test_disambiguation_choice_executes_chosen_command() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(
                Some("test"),
                0.5,
                &["build"],
            ))])),
            runner.clone(),
            Selection::Choice(1),
            vec![],
        );
        let outcome = uc.execute(Invocation::direct("check it")).await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Executed { ref command, .. } if command == "build"));
    }

    #[tokio::test]
    async fn test_disambiguation_abort_executes_nothing() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(
                Some("test"),
                0.5,
                &[],
            ))])),
            runner.clone(),
            Selection::Cancelled,
            vec![],
        );
        let outcome = uc.execute(Invocation::direct("check it")).await.unwrap();
        assert!(matches!(outcome, TurnOutcome::Cancelled));
        assert!(runner.targets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delegation_path_returns_report() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(None, 0.0, &[]))])),
            runner,
            Selection::Cancelled,
            vec![TaskSpec {
                specialist: Specialist::Terminal,
                goal: "create the config".into(),
                mode: TaskMode::Direct,
                params: HashMap::new(),
            }],
        );
        let outcome = uc
            .execute(Invocation::direct("create a default config file"))
            .await
            .unwrap();
        let TurnOutcome::Delegated(report) = outcome else {
            panic!("expected delegation");
        };
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_cli_error_goes_to_correction() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![Ok(interp(
                Some("build"),
                0.9,
                &[],
            ))])),
            runner.clone(),
            Selection::Cancelled,
            vec![],
        );
        let outcome = uc
            .execute(Invocation::cli_error("nlmake biuld", "unrecognized subcommand"))
            .await
            .unwrap();
        let TurnOutcome::Corrected(CorrectionOutcome::Executed { command, .. }) = outcome else {
            panic!("expected an executed correction");
        };
        assert_eq!(command, "build");
    }

    #[tokio::test]
    async fn test_interpreter_outage_surfaces_as_router_error() {
        let runner = Arc::new(RecordingRunner::new());
        let uc = turn(
            Arc::new(ScriptedInterpreter::new(vec![
                Err(InterpretationError::ServiceUnavailable("down".into())),
                Err(InterpretationError::ServiceUnavailable("down".into())),
            ])),
            runner,
            Selection::Cancelled,
            vec![],
        );
        let result = uc.execute(Invocation::direct("hello")).await;
        assert!(matches!(result, Err(TurnError::Router(_))));
    }
}
