mod output;

use anyhow::{Context, Result};
use aws_perms_simulate_core::{
    ActionCatalog, PermsSimulateService, PolicyGeneratorCatalog, DEFAULT_BATCH_SIZE,
    DEFAULT_CATALOG_URL, MAX_BATCH_SIZE,
};
use clap::{ArgAction, Parser};
use colored::Colorize;
use output::OutputFormat;
use std::process::ExitCode;

/// Asks AWS which actions a user or role may perform, using SimulatePrincipalPolicy
#[derive(Parser, Debug)]
#[command(name = "aws-perms-simulate")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// AWS profile name to use
    #[arg(long)]
    profile: String,

    /// User/Role ARN to check permissions for (by default uses the profile's own identity)
    #[arg(long)]
    arn: Option<String>,

    /// Region for the AWS clients (defaults to the profile's region, then us-east-1)
    #[arg(long)]
    region: Option<String>,

    /// Only test this action; repeat to test several (skips the catalog download)
    #[arg(long = "action", value_name = "SERVICE:ACTION")]
    actions: Vec<String>,

    /// Only test actions of this service prefix; repeat for several
    #[arg(long = "service", value_name = "PREFIX", conflicts_with = "actions")]
    services: Vec<String>,

    /// Number of actions per SimulatePrincipalPolicy call
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
    batch_size: usize,

    /// Print only the allowed actions
    #[arg(long)]
    allowed_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Location of the AWS Policy Generator action catalog
    #[arg(long, env = "AWS_PERMS_SIMULATE_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_batch_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (1..=MAX_BATCH_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("must be between 1 and {MAX_BATCH_SIZE}"))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Report colours follow stdout, stderr lines are painted per call
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {:#}",
                output::paint("Error:".red(), atty::is(atty::Stream::Stderr)),
                e
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Explicit actions are checked before anything touches the network
    let explicit_actions = if cli.actions.is_empty() {
        None
    } else {
        Some(ActionCatalog::from_actions(&cli.actions)?)
    };

    let service = PermsSimulateService::from_profile(&cli.profile, cli.region.as_deref())
        .await
        .context("Failed to initialize AWS clients")?;

    let identity = service.resolve_identity(cli.arn.as_deref()).await?;

    let catalog = match explicit_actions {
        Some(catalog) => catalog,
        None => {
            let source = PolicyGeneratorCatalog::new(cli.catalog_url.as_str());
            source
                .fetch()
                .await
                .with_context(|| format!("Unable to get AWS permissions from {}", source.url()))?
                .filter_services(&cli.services)?
        }
    };

    eprintln!(
        "{}",
        output::paint(
            format!(
                "Checking {} permissions for {}...",
                catalog.len(),
                identity.arn
            )
            .cyan(),
            atty::is(atty::Stream::Stderr)
        )
    );

    let progress = output::progress_bar(catalog.len());
    let report = service
        .simulate(&identity, &catalog, cli.batch_size, |done| {
            progress.inc(done as u64);
        })
        .await;
    progress.finish_and_clear();

    // Nothing reaches stdout unless every batch succeeded
    let report = report?;
    print!("{}", output::render(&report, cli.format, cli.allowed_only)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["aws-perms-simulate", "--profile", "dev"]).unwrap();
        assert_eq!(cli.profile, "dev");
        assert_eq!(cli.arn, None);
        assert_eq!(cli.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.allowed_only);
        assert!(cli.actions.is_empty());
    }

    #[test]
    fn test_repeated_actions_and_arn() {
        let cli = Cli::try_parse_from([
            "aws-perms-simulate",
            "--profile",
            "dev",
            "--arn",
            "arn:aws:iam::123456789012:role/Ops",
            "--action",
            "s3:GetObject",
            "--action",
            "ec2:RunInstances",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.arn.as_deref(), Some("arn:aws:iam::123456789012:role/Ops"));
        assert_eq!(cli.actions, vec!["s3:GetObject", "ec2:RunInstances"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_profile_is_required() {
        let err = Cli::try_parse_from(["aws-perms-simulate", "--arn", "arn:aws:iam::1:user/x"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_service_conflicts_with_action() {
        let result = Cli::try_parse_from([
            "aws-perms-simulate",
            "--profile",
            "dev",
            "--action",
            "s3:GetObject",
            "--service",
            "ec2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_size_bounds() {
        assert_eq!(parse_batch_size("1"), Ok(1));
        assert_eq!(parse_batch_size("100"), Ok(100));
        assert!(parse_batch_size("0").is_err());
        assert!(parse_batch_size("101").is_err());
        assert!(parse_batch_size("many").is_err());
    }
}
