use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use noorix::core::{LengthPreference, PipelineState, Stage};
use noorix::errors::FailureInfo;
use noorix::observability::{init_tracing, LogFormat};
use noorix::prelude::*;
use tokio::sync::watch;

mod output;

#[derive(Parser)]
#[command(name = "noorix")]
#[command(version)]
#[command(
    about = "Generate a title, description and hashtags for a content idea",
    long_about = None
)]
struct Cli {
    /// Log output format: plain or json
    #[arg(long, global = true, default_value = "plain")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the three generation stages against the service
    #[clap(visible_alias = "g")]
    Generate {
        /// The content idea
        #[arg(short, long)]
        idea: String,
        /// Description length: very-large, large, medium or small
        #[arg(short, long, default_value = "large")]
        length: LengthPreference,
        /// Model identifier, overriding configuration
        #[arg(short, long)]
        model: Option<String>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the terminal state as JSON
        #[arg(long)]
        json: bool,
        /// Copy the text of this stage to the clipboard after a run
        #[arg(long)]
        copy: Option<Stage>,
    },
    /// Print the prompts that would be sent, without calling the service
    #[clap(visible_alias = "p")]
    Prompts {
        /// The content idea
        #[arg(short, long)]
        idea: String,
        /// Title to compose the description prompt from
        #[arg(short, long)]
        title: Option<String>,
        /// Description to compose the hashtags prompt from
        #[arg(short, long)]
        description: Option<String>,
        /// Description length: very-large, large, medium or small
        #[arg(short, long, default_value = "large")]
        length: LengthPreference,
    },
}

/// Exit code for a run that ended in a stage failure.
const EXIT_STAGE_FAILURE: u8 = 1;
/// Exit code for a rejected request.
const EXIT_INVALID_INPUT: u8 = 2;

/// How a `generate` invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    StageFailure,
    InvalidInput,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::StageFailure => Self::from(EXIT_STAGE_FAILURE),
            Outcome::InvalidInput => Self::from(EXIT_INVALID_INPUT),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format, "warn,noorix=info");

    let result = match cli.command {
        Commands::Generate {
            idea,
            length,
            model,
            config,
            json,
            copy,
        } => generate(GenerateArgs {
            idea,
            length,
            model,
            config,
            json,
            copy,
        })
        .await
        .map(ExitCode::from),
        Commands::Prompts {
            idea,
            title,
            description,
            length,
        } => {
            output::print_prompts(&idea, title.as_deref(), description.as_deref(), length);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

struct GenerateArgs {
    idea: String,
    length: LengthPreference,
    model: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    copy: Option<Stage>,
}

/// Rejects a blank idea, then loads configuration and the service client.
async fn generate(args: GenerateArgs) -> anyhow::Result<Outcome> {
    if GenerationRequest::new(args.idea.as_str(), args.length).is_blank() {
        let error = NoorixError::InvalidInput("idea must not be empty".to_string());
        report_rejection(&error, &PipelineState::default(), args.json)?;
        return Ok(Outcome::InvalidInput);
    }

    let mut config = match &args.config {
        Some(path) => NoorixConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => NoorixConfig::default(),
    }
    .apply_env();
    if let Some(model) = args.model.clone() {
        config.generator.model = model;
    }
    config.validate()?;

    let generator = GeminiGenerator::from_env(&config.generator)?;
    run_generation(args, &config, Arc::new(generator)).await
}

async fn run_generation(
    args: GenerateArgs,
    config: &NoorixConfig,
    generator: Arc<dyn TextGenerator>,
) -> anyhow::Result<Outcome> {
    let pipeline = GenerationPipeline::from_config(generator, config)
        .with_event_sink(Arc::new(LoggingEventSink::default()));
    tracing::debug!(model = %pipeline.model(), length = %args.length, "Starting generation");
    let mut session = GenerationSession::new(pipeline);
    session.set_idea(args.idea);
    session.set_length(args.length);

    let progress = (!args.json).then(|| tokio::spawn(follow_progress(session.pipeline().subscribe())));

    let outcome = session.generate().await;
    if let Some(progress) = progress {
        progress.abort();
    }

    let state = match outcome {
        Ok(state) => state,
        Err(e) if e.is_invalid_input() => {
            report_rejection(&e, &session.state(), args.json)?;
            return Ok(Outcome::InvalidInput);
        }
        Err(e) => return Err(e.into()),
    };

    let failure = state
        .failure
        .clone()
        .map(|failure| FailureInfo::from(&NoorixError::from(failure)));
    if args.json {
        output::print_json(&state, failure.as_ref())?;
    } else {
        output::print_results(&state);
    }

    if let Some(stage) = args.copy {
        copy_stage(&session, stage).await?;
    }

    Ok(if state.has_failed() {
        Outcome::StageFailure
    } else {
        Outcome::Success
    })
}

fn report_rejection(error: &NoorixError, state: &PipelineState, json: bool) -> anyhow::Result<()> {
    if json {
        output::print_json(state, Some(&FailureInfo::from(error)))?;
    } else {
        eprintln!("Error: {error}");
    }
    Ok(())
}

async fn follow_progress(mut rx: watch::Receiver<PipelineState>) {
    let mut last: Option<String> = None;
    while rx.changed().await.is_ok() {
        let line = rx.borrow_and_update().progress_lines().pop();
        if line.is_some() && line != last {
            if let Some(line) = &line {
                eprintln!("{line}");
            }
            last = line;
        }
    }
}

#[cfg(feature = "clipboard")]
async fn copy_stage(session: &GenerationSession, stage: Stage) -> anyhow::Result<()> {
    let clipboard = noorix::export::ArboardClipboard::new()?;
    session.copy(stage, &clipboard).await?;
    eprintln!("Copied {stage} to clipboard");
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
async fn copy_stage(_session: &GenerationSession, stage: Stage) -> anyhow::Result<()> {
    anyhow::bail!("cannot copy {stage}: built without the clipboard feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use noorix::testing::ScriptedGenerator;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["noorix", "generate", "--idea", "garden tips"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Plain);
        match cli.command {
            Commands::Generate {
                idea,
                length,
                json,
                copy,
                ..
            } => {
                assert_eq!(idea, "garden tips");
                assert_eq!(length, LengthPreference::Large);
                assert!(!json);
                assert_eq!(copy, None);
            }
            Commands::Prompts { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_parses_length_and_stage() {
        let cli = Cli::try_parse_from([
            "noorix",
            "--log-format",
            "json",
            "g",
            "-i",
            "garden tips",
            "--length",
            "very-large",
            "--copy",
            "hashtags",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Generate { length, copy, .. } => {
                assert_eq!(length, LengthPreference::VeryLarge);
                assert_eq!(copy, Some(Stage::Hashtags));
            }
            Commands::Prompts { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_rejects_unknown_length() {
        assert!(Cli::try_parse_from(["noorix", "generate", "--idea", "x", "--length", "huge"]).is_err());
    }

    fn json_args(idea: &str) -> GenerateArgs {
        GenerateArgs {
            idea: idea.to_string(),
            length: LengthPreference::Medium,
            model: None,
            config: None,
            json: true,
            copy: None,
        }
    }

    #[tokio::test]
    async fn test_successful_run_exits_zero() {
        let generator = Arc::new(ScriptedGenerator::new());
        let outcome = run_generation(json_args("garden tips"), &NoorixConfig::default(), generator.clone())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn test_stage_failure_exits_one() {
        let generator = Arc::new(
            ScriptedGenerator::new().fail(Stage::Description, GenerationError::EmptyResponse),
        );
        let outcome = run_generation(json_args("garden tips"), &NoorixConfig::default(), generator.clone())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::StageFailure);
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_idea_exits_two_without_calls() {
        let generator = Arc::new(ScriptedGenerator::new());
        let outcome = run_generation(json_args("   "), &NoorixConfig::default(), generator.clone())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::InvalidInput);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_idea_rejected_before_config_and_client() {
        // The config path does not exist and no client is built.
        let args = GenerateArgs {
            config: Some(PathBuf::from("/nonexistent/noorix.json")),
            ..json_args("")
        };
        let outcome = generate(args).await.unwrap();
        assert_eq!(outcome, Outcome::InvalidInput);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_ne!(EXIT_STAGE_FAILURE, EXIT_INVALID_INPUT);
        assert_ne!(EXIT_STAGE_FAILURE, 0);
    }
}
