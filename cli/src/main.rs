//! CLI entrypoint for nlmake
//!
//! Wires together all layers using dependency injection and dispatches
//! the parsed subcommand. A failed argument parse is not fatal: the
//! captured error is fed back through the correction flow, so a typo
//! like `nlmake biuld` can still end in a confirmed `make build`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use nlmake_application::ExecutionParams;
use nlmake_application::ports::{
    BuildFilePort, BuildRunnerPort, ConfirmationPort, PlanArtifactStore, SpecialistPort,
    VerificationPort,
};
use nlmake_application::use_cases::{
    CorrectErrorUseCase, CorrectionOutcome, DelegateUseCase, DisambiguateUseCase, RouteUseCase,
    RunRequestUseCase, TddCycleUseCase, TurnOutcome,
};
use nlmake_domain::Invocation;
use nlmake_infrastructure::specialists::CodingSpecialist;
use nlmake_infrastructure::{
    ConfigLoader, FileConfig, FilePlanStore, MakeRunner, MakefileReader, OllamaClient,
    OllamaInterpreter, ShellVerifier, default_registry,
};
use nlmake_presentation::{
    CandidateSelector, Cli, Command, ConfigAction, ConsoleFormatter, InteractiveConfirmation,
    InteractiveSession, ProgressReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_failure(error).await,
    };

    let _guard = init_logging(cli.verbose, cli.quiet);
    info!("starting nlmake");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    for issue in config.validate() {
        warn!(%issue, "configuration issue");
    }

    // Config inspection needs no services wired up.
    if let Some(Command::Config { action }) = &cli.command {
        match action {
            ConfigAction::Show => println!("{}", config.render()),
            ConfigAction::Path => println!("{}", ConfigLoader::describe_sources()),
        }
        return Ok(());
    }

    let services = Services::build(config, cli.yes)?;

    match cli.command {
        None => {
            let turn = Arc::new(services.turn());
            InteractiveSession::new(turn, services.build_file.clone(), cli.quiet)
                .run()
                .await;
            Ok(())
        }
        Some(Command::Run { request }) => run_once(&services, &request.join(" "), cli.quiet).await,
        Some(Command::Agent { goal }) => run_agent(&services, &goal.join(" ")).await,
        Some(Command::Tdd { goal }) => run_tdd(&services, &goal.join(" ")).await,
        Some(Command::Config { .. }) => unreachable!("handled above"),
    }
}

/// Route a clap failure through the correction flow. Help and version
/// requests are not failures and exit as usual.
async fn handle_parse_failure(error: clap::Error) -> Result<()> {
    if matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        error.exit();
    }

    let _guard = init_logging(0, false);
    eprint!("{error}");

    let attempted: Vec<String> = std::env::args().skip(1).collect();
    let invocation = Invocation::cli_error(
        format!("nlmake {}", attempted.join(" ")),
        error.to_string(),
    );

    let config = ConfigLoader::load(None)?;
    let services = Services::build(config, false)?;
    let outcome = services.correction().execute(&invocation).await?;
    print!("{}", ConsoleFormatter::format_correction(&outcome));

    match outcome {
        CorrectionOutcome::Executed { outcome, .. } if outcome.success() => Ok(()),
        _ => std::process::exit(2),
    }
}

async fn run_once(services: &Services, request: &str, quiet: bool) -> Result<()> {
    let turn = services.turn();
    let mut progress = ProgressReporter::new(quiet);
    progress.start("thinking...");
    let result = turn.execute(Invocation::direct(request)).await;
    progress.finish();

    let outcome = result?;
    print!("{}", ConsoleFormatter::format_turn(&outcome));
    if let TurnOutcome::Executed { outcome, .. } = &outcome
        && !outcome.success()
    {
        std::process::exit(outcome.exit_code);
    }
    Ok(())
}

async fn run_agent(services: &Services, goal: &str) -> Result<()> {
    let report = services
        .delegate()
        .execute(goal, &services.target_context())
        .await?;
    print!("{}", ConsoleFormatter::format_report(&report));
    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_tdd(services: &Services, goal: &str) -> Result<()> {
    let outcome = services
        .tdd
        .execute(goal, &services.target_context())
        .await?;
    println!("{}", outcome.summary);
    if outcome.artifact_retained {
        println!("Plan kept at {}", services.config.agent.plan_artifact);
    }
    Ok(())
}

/// The long-lived pieces every flow shares, built once from config.
/// Use cases that are cheap to assemble (they only clone Arcs) are
/// constructed per call.
struct Services {
    config: FileConfig,
    params: ExecutionParams,
    interpreter: Arc<OllamaInterpreter>,
    runner: Arc<dyn BuildRunnerPort>,
    build_file: Arc<dyn BuildFilePort>,
    confirmation: Arc<dyn ConfirmationPort>,
    tdd: Arc<TddCycleUseCase>,
    task_timeout: Duration,
}

impl Services {
    fn build(config: FileConfig, assume_yes: bool) -> Result<Self> {
        let params = config.execution_params()?;
        let client = OllamaClient::new(
            config.ollama.base_url.clone(),
            config.ollama.model.clone(),
            Duration::from_secs(config.ollama.timeout_secs),
        )?;
        let interpreter = Arc::new(OllamaInterpreter::new(client));
        let runner: Arc<dyn BuildRunnerPort> = Arc::new(MakeRunner::new(
            config.runner.make_program.clone(),
            Duration::from_secs(config.runner.timeout_secs),
        ));
        let build_file: Arc<dyn BuildFilePort> = Arc::new(MakefileReader::current_dir());
        let confirmation: Arc<dyn ConfirmationPort> =
            Arc::new(InteractiveConfirmation::new(assume_yes));
        let task_timeout = Duration::from_secs(config.agent.task_timeout_secs);

        let verifier: Arc<dyn VerificationPort> = Arc::new(ShellVerifier::new(
            config.agent.verify_command.clone(),
            Duration::from_secs(config.runner.timeout_secs),
        ));
        let store: Arc<dyn PlanArtifactStore> =
            Arc::new(FilePlanStore::new(config.agent.plan_artifact.clone()));
        // The TDD coder authors tests and code into the project tree, so
        // the verify command can see them.
        let coder: Arc<dyn SpecialistPort> = Arc::new(CodingSpecialist::in_dir(".", task_timeout));
        let tdd = Arc::new(TddCycleUseCase::new(
            interpreter.clone(),
            coder,
            verifier,
            confirmation.clone(),
            store,
            params.clone(),
        ));

        Ok(Services {
            config,
            params,
            interpreter,
            runner,
            build_file,
            confirmation,
            tdd,
            task_timeout,
        })
    }

    fn turn(&self) -> RunRequestUseCase {
        RunRequestUseCase::new(
            RouteUseCase::new(self.interpreter.clone(), self.params.clone()),
            DisambiguateUseCase::new(Arc::new(CandidateSelector::new())),
            self.delegate(),
            self.correction(),
            self.runner.clone(),
            self.build_file.clone(),
        )
    }

    fn delegate(&self) -> DelegateUseCase {
        let registry = default_registry(PathBuf::from("."), self.runner.clone(), self.task_timeout);
        DelegateUseCase::new(
            self.interpreter.clone(),
            registry,
            self.confirmation.clone(),
            self.config.safety(),
        )
        .with_tdd(self.tdd.clone())
    }

    fn correction(&self) -> CorrectErrorUseCase {
        CorrectErrorUseCase::new(
            self.interpreter.clone(),
            self.confirmation.clone(),
            self.runner.clone(),
        )
    }

    /// Target summary for planner context; an absent build file leaves
    /// the planner to work from the goal alone.
    fn target_context(&self) -> String {
        match self.build_file.read() {
            Ok(document) => document.render_target_summary(),
            Err(error) => {
                warn!(%error, "no build file available for planner context");
                String::new()
            }
        }
    }
}

/// Stderr gets the level picked by -v/-q; a rolling file under the
/// state directory always records at debug for post-mortems.
fn init_logging(verbose: u8, quiet: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file_layer, guard) = match dirs::state_dir().or_else(dirs::data_local_dir) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("nlmake"), "nlmake.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}
