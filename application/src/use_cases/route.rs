//! Routing use case: interpret a request and decide what happens to it.
//!
//! The policy, with threshold `T` and interpretation confidence `c`:
//!
//! - command present and `c >= T`: execute it
//! - `0 < c < T`, or no command but alternatives exist: disambiguate
//! - no command, no alternatives, and the text reads like a task: delegate
//! - otherwise: no actionable interpretation
//!
//! A failed interpretation call is retried once with backoff. If the retry
//! also fails, a task-like request still degrades into delegation; anything
//! else propagates the error.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use nlmake_domain::{
    BuildFileDocument, ConfidenceThreshold, Interpretation, Invocation, InvocationOrigin,
    RoutingDecision, has_task_cues,
};

use crate::config::ExecutionParams;
use crate::ports::{InterpretationError, InterpretationRequest, InterpreterPort};

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("No actionable interpretation for the request")]
    NoActionableInterpretation,

    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
}

/// A routing decision together with the interpretation that produced it.
/// The interpretation is absent when the decision was reached without a
/// model response (captured CLI errors, delegation after a failed call).
#[derive(Debug)]
pub struct RoutedRequest {
    pub decision: RoutingDecision,
    pub interpretation: Option<Interpretation>,
}

pub struct RouteUseCase {
    interpreter: Arc<dyn InterpreterPort>,
    params: ExecutionParams,
}

impl RouteUseCase {
    pub fn new(interpreter: Arc<dyn InterpreterPort>, params: ExecutionParams) -> Self {
        RouteUseCase {
            interpreter,
            params,
        }
    }

    pub async fn route(
        &self,
        invocation: &Invocation,
        build_file: &BuildFileDocument,
    ) -> Result<RoutedRequest, RouterError> {
        // Captured CLI errors skip interpretation entirely; the correction
        // flow owns them.
        if let InvocationOrigin::CapturedCliError { error_text } = &invocation.origin {
            return Ok(RoutedRequest {
                decision: RoutingDecision::SuggestCorrection {
                    original: invocation.text.clone(),
                    error_text: error_text.clone(),
                },
                interpretation: None,
            });
        }

        let request =
            InterpretationRequest::route(&invocation.text, build_file.render_target_summary());
        let interpretation = match self.interpret_with_retry(request).await {
            Ok(interpretation) => interpretation,
            Err(error) if has_task_cues(&invocation.text) => {
                warn!(%error, "interpretation failed, delegating on task cues");
                return Ok(RoutedRequest {
                    decision: RoutingDecision::Delegate(invocation.text.clone()),
                    interpretation: None,
                });
            }
            Err(error) => return Err(error.into()),
        };

        let decision = decide(&interpretation, &invocation.text, self.params.threshold)?;
        debug!(
            kind = decision.kind(),
            confidence = interpretation.confidence.value(),
            "routed request"
        );
        Ok(RoutedRequest {
            decision,
            interpretation: Some(interpretation),
        })
    }

    async fn interpret_with_retry(
        &self,
        request: InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError> {
        let mut attempt = 0;
        loop {
            match self.interpreter.interpret(request.clone()).await {
                Ok(interpretation) => return Ok(interpretation),
                Err(error) if attempt < self.params.interpreter_retries => {
                    attempt += 1;
                    warn!(%error, attempt, "interpretation failed, retrying");
                    tokio::time::sleep(self.params.retry_backoff).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// The pure routing policy, separated from retries and I/O.
pub fn decide(
    interpretation: &Interpretation,
    request_text: &str,
    threshold: ConfidenceThreshold,
) -> Result<RoutingDecision, RouterError> {
    if let Some(command) = &interpretation.command
        && interpretation.confidence.meets(threshold)
    {
        return Ok(RoutingDecision::Execute(command.clone()));
    }

    let has_alternatives = !interpretation.alternatives.is_empty();
    if interpretation.confidence.is_uncertain(threshold)
        || (interpretation.command.is_none() && has_alternatives)
    {
        let candidates = interpretation.candidate_commands();
        if !candidates.is_empty() {
            return Ok(RoutingDecision::Disambiguate(candidates));
        }
    }

    if interpretation.command.is_none() && !has_alternatives && has_task_cues(request_text) {
        return Ok(RoutingDecision::Delegate(request_text.to_string()));
    }

    Err(RouterError::NoActionableInterpretation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::{ScriptedInterpreter, StaticBuildFile};
    use nlmake_domain::Confidence;
    use std::time::Duration;

    fn interp(command: Option<&str>, confidence: f64, alternatives: &[&str]) -> Interpretation {
        Interpretation::new(
            command.map(String::from),
            Confidence::new(confidence).unwrap(),
            alternatives.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    fn fast_params() -> ExecutionParams {
        ExecutionParams {
            retry_backoff: Duration::from_millis(1),
            ..ExecutionParams::default()
        }
    }

    fn use_case(responses: Vec<Result<Interpretation, InterpretationError>>) -> RouteUseCase {
        RouteUseCase::new(Arc::new(ScriptedInterpreter::new(responses)), fast_params())
    }

    fn build_file() -> BuildFileDocument {
        StaticBuildFile::sample().0
    }

    #[tokio::test]
    async fn test_high_confidence_executes() {
        let uc = use_case(vec![Ok(interp(Some("build"), 0.95, &[]))]);
        let routed = uc
            .route(&Invocation::direct("build the project"), &build_file())
            .await
            .unwrap();
        assert_eq!(routed.decision, RoutingDecision::Execute("build".into()));
        // The interpretation behind the decision travels with it.
        assert_eq!(routed.interpretation.unwrap().confidence.value(), 0.95);
    }

    #[tokio::test]
    async fn test_threshold_equality_executes() {
        let uc = use_case(vec![Ok(interp(Some("test"), 0.8, &[]))]);
        let routed = uc
            .route(&Invocation::direct("run tests"), &build_file())
            .await
            .unwrap();
        assert_eq!(routed.decision, RoutingDecision::Execute("test".into()));
    }

    #[tokio::test]
    async fn test_uncertain_band_disambiguates_primary_first() {
        let uc = use_case(vec![Ok(interp(Some("test"), 0.5, &["test-unit"]))]);
        let routed = uc
            .route(&Invocation::direct("run the checks"), &build_file())
            .await
            .unwrap();
        assert_eq!(
            routed.decision,
            RoutingDecision::Disambiguate(vec!["test".into(), "test-unit".into()])
        );
    }

    #[tokio::test]
    async fn test_null_command_with_alternatives_disambiguates() {
        let uc = use_case(vec![Ok(interp(None, 0.0, &["build", "rebuild"]))]);
        let routed = uc
            .route(&Invocation::direct("do the thing"), &build_file())
            .await
            .unwrap();
        assert_eq!(
            routed.decision,
            RoutingDecision::Disambiguate(vec!["build".into(), "rebuild".into()])
        );
    }

    #[tokio::test]
    async fn test_empty_interpretation_with_cues_delegates() {
        let uc = use_case(vec![Ok(interp(None, 0.0, &[]))]);
        let routed = uc
            .route(
                &Invocation::direct("refactor the parser module"),
                &build_file(),
            )
            .await
            .unwrap();
        assert_eq!(
            routed.decision,
            RoutingDecision::Delegate("refactor the parser module".into())
        );
    }

    #[tokio::test]
    async fn test_empty_interpretation_without_cues_is_not_actionable() {
        let uc = use_case(vec![Ok(interp(None, 0.0, &[]))]);
        let result = uc
            .route(&Invocation::direct("what is this repo"), &build_file())
            .await;
        assert!(matches!(
            result,
            Err(RouterError::NoActionableInterpretation)
        ));
    }

    #[tokio::test]
    async fn test_failed_call_retries_once_then_succeeds() {
        let interpreter = Arc::new(ScriptedInterpreter::new(vec![
            Err(InterpretationError::ServiceUnavailable("down".into())),
            Ok(interp(Some("build"), 0.9, &[])),
        ]));
        let uc = RouteUseCase::new(interpreter.clone(), fast_params());
        let routed = uc
            .route(&Invocation::direct("compile it"), &build_file())
            .await
            .unwrap();
        assert_eq!(routed.decision, RoutingDecision::Execute("build".into()));
        assert_eq!(interpreter.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_with_cues_delegates() {
        let uc = use_case(vec![
            Err(InterpretationError::Timeout),
            Err(InterpretationError::Timeout),
        ]);
        let routed = uc
            .route(&Invocation::direct("fix the login bug"), &build_file())
            .await
            .unwrap();
        assert_eq!(
            routed.decision,
            RoutingDecision::Delegate("fix the login bug".into())
        );
        assert!(routed.interpretation.is_none());
    }

    #[tokio::test]
    async fn test_exhausted_retries_without_cues_propagates() {
        let uc = use_case(vec![
            Err(InterpretationError::Timeout),
            Err(InterpretationError::Timeout),
        ]);
        let result = uc
            .route(&Invocation::direct("hello there"), &build_file())
            .await;
        assert!(matches!(
            result,
            Err(RouterError::Interpretation(InterpretationError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_cli_error_origin_bypasses_interpreter() {
        let interpreter = Arc::new(ScriptedInterpreter::new(vec![]));
        let uc = RouteUseCase::new(interpreter.clone(), fast_params());
        let invocation = Invocation::cli_error("nlmake biuld", "unrecognized subcommand");
        let routed = uc.route(&invocation, &build_file()).await.unwrap();
        assert_eq!(
            routed.decision,
            RoutingDecision::SuggestCorrection {
                original: "nlmake biuld".into(),
                error_text: "unrecognized subcommand".into(),
            }
        );
        assert!(routed.interpretation.is_none());
        assert!(interpreter.requests.lock().unwrap().is_empty());
    }
}
