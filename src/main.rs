use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use commit_lint::{
    lint, load, pull_request_title, ConfigSource, Diagnostic, FileSource, MessageSource, Outcome,
    Paint, RuleConfig, COMMIT_EDITMSG,
};

const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "commit-lint", version)]
#[command(about = "Check a commit message or pull-request title against <type>(<scope>): <subject>")]
struct Cli {
    /// Rule file (YAML); the built-in conventional rules are used without one
    #[arg(short, long, value_name = "PATH", env = "COMMITLINT_RULE")]
    rule: Option<PathBuf>,

    /// Commit message file read when stdin has nothing
    #[arg(long, value_name = "PATH", default_value = COMMIT_EDITMSG)]
    message_file: PathBuf,

    /// Pull-request title checked when neither stdin nor the message file has a line
    #[arg(long, value_name = "TITLE", env = "PR_TITLE")]
    pr_title: Option<String>,

    /// When to color the diagnostic
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn paint(self) -> Paint {
        match self {
            ColorChoice::Auto if io::stdout().is_terminal() => Paint::Ansi,
            ColorChoice::Always => {
                colored::control::set_override(true);
                Paint::Ansi
            }
            ColorChoice::Auto | ColorChoice::Never => Paint::Plain,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let (line, config) = match setup(&cli) {
        Ok(setup) => setup,
        Err(err) => {
            tracing::error!("{err:#}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    match lint(&line, &config) {
        Outcome::Pass => {
            tracing::info!("message accepted");
            ExitCode::SUCCESS
        }
        Outcome::Skipped => {
            tracing::info!("message skipped");
            ExitCode::SUCCESS
        }
        Outcome::Fail(err) => {
            tracing::info!(kind = %err.kind(), "message rejected");
            let diagnostic = Diagnostic::from_error(&line, &err, &config);
            println!("{}", diagnostic.render(cli.color.paint()));
            ExitCode::from(EXIT_FAILED)
        }
    }
}

fn setup(cli: &Cli) -> Result<(String, RuleConfig)> {
    let rule = cli.rule.as_ref().map(FileSource::new);
    let config = load(rule.as_ref().map(|source| source as &dyn ConfigSource))
        .context("failed to load rules")?;

    let stdin = io::stdin();
    let stdin = (!stdin.is_terminal()).then(|| stdin.lock());
    let (origin, line) = MessageSource::new(stdin, &cli.message_file)
        .with_pr_title(cli.pr_title.clone().or_else(github_pr_title))
        .resolve()
        .context("failed to find a message to check")?;
    tracing::debug!(?origin, %line, "checking message");

    Ok((line, config))
}

fn github_pr_title() -> Option<String> {
    let path = std::env::var_os("GITHUB_EVENT_PATH")?;
    let event = fs::read(&path)
        .map_err(|err| tracing::warn!(path = ?path, "failed to read event payload: {err}"))
        .ok()?;
    pull_request_title(&event)
}
