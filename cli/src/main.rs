//! CLI for mantis2github.
//!
//! Gathers the migration configuration and user substitutes (from flags,
//! environment, a substitutes file or interactive prompts) and runs the
//! Mantis to GitHub migration.

mod prompt;

use clap::Parser;
use mantis2github::config::{DEFAULT_GITHUB_API_BASE, DEFAULT_THROTTLE};
use mantis2github::{
    load_substitutes, MigrationConfig, RepoIdentifier, RunSummary, Runner, RunnerError,
    TemplateRenderer,
};
use prompt::{prompt_line, value_or_prompt, InteractiveSubstitutes};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// mantis2github - Migrate Mantis Bug Tracker issues into a GitHub repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Mantis instance.
    #[arg(long, env = "MANTIS_URL")]
    mantis_url: Option<String>,

    /// Mantis API token.
    #[arg(long, env = "MANTIS_API_TOKEN", hide_env_values = true)]
    mantis_token: Option<String>,

    /// Mantis project to migrate (all projects when empty).
    #[arg(long, env = "MANTIS_PROJECT")]
    project: Option<String>,

    /// Target repository (owner/repo).
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// TOML file mapping Mantis user ids to GitHub logins.
    #[arg(long)]
    users: Option<PathBuf>,

    /// Handlebars template for issue bodies.
    #[arg(long)]
    body_template: Option<PathBuf>,

    /// GitHub REST API base URL.
    #[arg(long, default_value = DEFAULT_GITHUB_API_BASE)]
    github_api_url: String,

    /// Delay before each GitHub API call, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_THROTTLE.as_millis() as u64)]
    throttle_ms: u64,

    /// Never prompt; fail on missing values and leave unmapped users unassigned.
    #[arg(long)]
    no_prompt: bool,

    /// Preview the migration without writing to GitHub.
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();
    let json = args.json;

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            if json {
                print_json(&summary);
            } else {
                print_summary(&summary);
            }
            ExitCode::from(0)
        }
        Err(e) => {
            if let RunnerError::Replication(failure) = &e {
                print_partial_progress(failure);
            }
            error!(error = %e, "Migration failed");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let interactive = !args.no_prompt;

    let mantis_url = value_or_prompt(
        args.mantis_url,
        "mantis_url",
        "URL of the Mantis Bug Tracker",
        interactive,
    )?;
    let mantis_token = value_or_prompt(
        args.mantis_token,
        "mantis_token",
        "Mantis API token",
        interactive,
    )?;
    let project = match args.project {
        Some(project) => project,
        None if interactive => prompt_line("Mantis project name (leave empty for all)")?,
        None => String::new(),
    };
    let repository = match args.repo.filter(|repo| !repo.trim().is_empty()) {
        Some(repo) => RepoIdentifier::parse(&repo)?,
        None if interactive => {
            let owner = prompt_line("Owner of the GitHub repository")?;
            let name = prompt_line("Name of the destination GitHub repository")?;
            RepoIdentifier::new(&owner, &name)?
        }
        None => return Err(mantis2github::ConfigError::MissingValue { name: "repo" }.into()),
    };
    let token = value_or_prompt(args.token, "github_token", "GitHub token", interactive)?;

    let config = MigrationConfig::new(&mantis_url, &mantis_token, &project, repository, &token)?
        .with_github_api_base(&args.github_api_url)?
        .with_throttle(Duration::from_millis(args.throttle_ms))
        .with_dry_run(args.dry_run);

    let known = match &args.users {
        Some(path) => load_substitutes(path)?,
        None => HashMap::new(),
    };
    let mut substitutes = InteractiveSubstitutes::new(known, interactive);

    let mut runner = Runner::new(config)?;
    if let Some(path) = &args.body_template {
        runner = runner.with_renderer(TemplateRenderer::from_template_file(path)?);
    }
    info!(
        repo = %runner.config().repository().full_name(),
        dry_run = runner.config().dry_run(),
        "Starting migration"
    );
    runner.run(&mut substitutes).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    if summary.dry_run {
        print_dry_run_preview(summary);
    }

    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues fetched: {}", summary.issues_fetched);
    println!("  Issues selected: {}", summary.issues_selected);
    println!(
        "  Users substituted: {}/{}",
        summary.users_substituted, summary.users_found
    );

    if !summary.dry_run {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Comments created: {}", summary.comments_created);
        println!("  Issues closed: {}", summary.issues_closed);
    }
}

fn print_dry_run_preview(summary: &RunSummary) {
    println!("\n[DRY RUN] {} issues would be created:\n", summary.plans.len());

    for (i, plan) in summary.plans.iter().enumerate() {
        println!(
            "  [{}/{}] Mantis #{}: \"{}\"",
            i + 1,
            summary.plans.len(),
            plan.mantis_id,
            plan.issue.title
        );
        match plan.issue.assignees.first() {
            Some(login) => println!("    Assignee: {login}"),
            None => println!("    Assignee: none"),
        }
        println!("    Comments: {}", plan.comment_count);
        match plan.close {
            Some(reason) => println!("    Would close as: {reason}"),
            None => println!("    Would stay open"),
        }
    }

    if let Some(selected) = &summary.selected {
        match serde_json::to_string_pretty(selected) {
            Ok(json) => println!("\nSelected issues:\n{json}"),
            Err(e) => error!(error = %e, "Failed to serialize selected issues"),
        }
    }
}

fn print_partial_progress(failure: &mantis2github::ReplicationError) {
    println!(
        "\nStopped at Mantis issue #{} after {} issues were fully replicated.",
        failure.issue_id,
        failure.completed.len()
    );
    if let Some(number) = failure.issue_number {
        println!("  GitHub issue #{number} was created but is incomplete.");
    }
    for result in &failure.completed {
        println!(
            "  Mantis #{} -> GitHub #{}",
            result.mantis_id, result.issue_number
        );
    }
}

fn print_json(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Failed to serialize summary"),
    }
}
