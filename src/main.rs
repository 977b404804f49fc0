use anyhow::{Context, Result};
use cuke::cli::commands::{ListCommand, RunCommand};
use cuke::cli::output::{format_pickle, style, INFO, WARN};
use cuke::cli::{Cli, Command};
use cuke::{ConsoleReporter, Cucumber, Envelope, GherkinSubprocess, PickleSource, RunConfig, StepRegistry};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Run(cmd) => run_features(cmd, config).await?,
        Command::List(cmd) => list_pickles(cmd, config).await?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("Failed to load run config {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

async fn run_features(cmd: &RunCommand, config: RunConfig) -> Result<()> {
    let config = cmd.apply(config);
    config.validate().context("Invalid run configuration")?;

    if config.features.is_empty() {
        anyhow::bail!("No feature files given on the command line or in the config");
    }

    let source = GherkinSubprocess::resolve(&config.gherkin, config.timeout_secs)
        .context("Failed to locate the gherkin executable")?;

    // No step definitions are compiled into the binary, so every step
    // comes back undefined with a snippet to start from.
    let reporter = Arc::new(ConsoleReporter::new(config.snippet_dialect.dialect()));
    let engine = Cucumber::new(StepRegistry::new())
        .with_reporter(reporter)
        .with_tag_filter(config.tags.clone().into_predicate());

    let mut had_errors = false;
    for feature in &config.features {
        match engine.run(&source, feature).await {
            Ok(summary) => had_errors |= summary.had_errors(),
            Err(e) => {
                error!("Feature {} aborted: {:#}", feature.display(), anyhow::Error::from(e));
                had_errors = true;
            }
        }
    }

    if had_errors {
        std::process::exit(1);
    }

    Ok(())
}

async fn list_pickles(cmd: &ListCommand, config: RunConfig) -> Result<()> {
    let gherkin = cmd.gherkin.as_deref().unwrap_or(&config.gherkin);
    let source = GherkinSubprocess::resolve(gherkin, config.timeout_secs)
        .context("Failed to locate the gherkin executable")?;

    let envelopes = source
        .envelopes(&cmd.feature)
        .await
        .with_context(|| format!("Failed to parse {}", cmd.feature.display()))?;

    let mut pickles = Vec::new();
    for envelope in envelopes {
        match envelope {
            Envelope::Pickle(pickle) => pickles.push(pickle),
            Envelope::ParseError(e) => anyhow::bail!("{}", e.describe()),
            Envelope::Source(_) | Envelope::GherkinDocument(_) => {}
        }
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&pickles)?);
        return Ok(());
    }

    if pickles.is_empty() {
        println!("{} No scenarios in {}", WARN, style(cmd.feature.display()).bold());
        return Ok(());
    }

    println!(
        "{} {} scenarios in {}:",
        INFO,
        style(pickles.len()).cyan(),
        style(cmd.feature.display()).bold()
    );
    for pickle in &pickles {
        println!("{}", format_pickle(pickle));
    }

    Ok(())
}
