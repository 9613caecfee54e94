//! Teamsync CLI - Grafana team Terraform from directory groups

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use teamsync_core::render::{self, RenderMode};
use teamsync_core::{
    normalize, provider_from_settings, DirectoryProvider, Group, GroupCache, ScaffoldBuilder,
    Settings, SyncResult,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "teamsync")]
#[command(about = "Generate Grafana team Terraform from directory groups")]
#[command(version)]
pub struct Args {
    /// Path to the YAML config file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory provider to use, overriding the config file
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one grafana_team + external group resource per directory group
    Teams {
        /// File to write
        #[arg(short, long, default_value = "grafana_teams.tf")]
        output: PathBuf,
    },
    /// Write a team_ids output block covering every generated team
    Outputs {
        /// File to write
        #[arg(short, long, default_value = "outputs.tf")]
        output: PathBuf,
    },
    /// Write both the teams file and the outputs file from a single fetch
    Generate {
        #[arg(long = "teams-file", default_value = "grafana_teams.tf")]
        teams_file: PathBuf,

        #[arg(long = "outputs-file", default_value = "outputs.tf")]
        outputs_file: PathBuf,
    },
    /// Create or update the Terraform module structure
    Init {
        /// Base directory of the Terraform project
        #[arg(short, long, default_value = "grafana")]
        directory: PathBuf,
    },
    /// Print the directory groups and their resource names
    List,
}

/// Directory provider plus the groups it has already returned this run
struct Session {
    provider: Box<dyn DirectoryProvider>,
    cache: GroupCache,
}

impl Session {
    fn new(provider: Box<dyn DirectoryProvider>) -> Self {
        Self {
            provider,
            cache: GroupCache::new(),
        }
    }

    async fn groups(&mut self) -> Result<&[Group]> {
        let provider = &self.provider;
        self.cache
            .get_or_fetch(|| provider.fetch_all_groups())
            .await
            .with_context(|| format!("Failed to fetch groups from {}", provider.name()))
    }
}

/// Pick the log filter: RUST_LOG, then -v/-q, then the config file, then info.
///
/// Also returns a warning when the configured level could not be parsed and
/// the filter fell back to info.
fn log_filter(args: &Args, config_level: Option<&str>) -> (EnvFilter, Option<String>) {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return (filter, None);
    }

    let level = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => config_level.unwrap_or("info"),
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new("info"),
            Some(format!("Invalid log_level {:?} ({}), using info", level, e)),
        ),
    }
}

fn init_logging(args: &Args, config_level: Option<&str>) {
    let (filter, warning) = log_filter(args, config_level);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
    }
}

fn print_written(path: &Path) {
    println!("  {} {}", "->".blue(), path.display());
}

async fn run(args: Args, settings: SyncResult<Settings>) -> Result<()> {
    let mut settings = settings.context("Failed to set up configuration")?;
    if let Some(provider) = args.provider {
        settings.provider = provider;
    }

    let provider =
        provider_from_settings(&settings).context("Failed to set up directory provider")?;
    let mut session = Session::new(provider);

    match args.command {
        Command::Teams { output } => {
            let groups = session.groups().await?;
            render::write_rendered(&output, groups, RenderMode::Flat)
                .context("Failed to generate Terraform file")?;
            println!("{}", "Terraform file generated successfully".green().bold());
            print_written(&output);
        }
        Command::Outputs { output } => {
            let groups = session.groups().await?;
            render::write_rendered(&output, groups, RenderMode::Outputs)
                .context("Failed to generate outputs file")?;
            println!("{}", "Outputs file generated successfully".green().bold());
            print_written(&output);
        }
        Command::Generate {
            teams_file,
            outputs_file,
        } => {
            let groups = session.groups().await?;
            render::write_rendered(&teams_file, groups, RenderMode::Flat)
                .context("Failed to generate Terraform file")?;

            let groups = session.groups().await?;
            render::write_rendered(&outputs_file, groups, RenderMode::Outputs)
                .context("Failed to generate outputs file")?;

            println!("{}", "Terraform files generated successfully".green().bold());
            print_written(&teams_file);
            print_written(&outputs_file);
        }
        Command::Init { directory } => {
            let groups = session.groups().await?;
            let written = ScaffoldBuilder::new(&directory)
                .build(groups)
                .with_context(|| {
                    format!(
                        "Failed to create Terraform structure in {}",
                        directory.display()
                    )
                })?;
            println!(
                "{}",
                "Grafana Terraform folder structure created/updated successfully."
                    .green()
                    .bold()
            );
            for path in &written {
                print_written(path);
            }
        }
        Command::List => {
            let groups = session.groups().await?;
            for group in groups {
                println!(
                    "{} {} {}",
                    normalize(&group.name).cyan(),
                    group.name,
                    format!("({})", group.identifier).dimmed()
                );
            }
            println!();
            println!("{} {} group(s)", "Found".green().bold(), groups.len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load config before logging so the file can set the log level
    let settings = Settings::load(&args.config);
    init_logging(
        &args,
        settings.as_ref().ok().and_then(|s| s.log_level.as_deref()),
    );

    match run(args, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
