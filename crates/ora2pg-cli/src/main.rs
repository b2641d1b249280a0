use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ora2pg_application::{MigrationService, ModelSettings};
use ora2pg_execution::{TracingOptions, init_tracing};
use ora2pg_infrastructure::{AppPaths, ConfigService, EnvSecretService};

mod commands;

#[derive(Parser)]
#[command(name = "ora2pg")]
#[command(about = "Ora2PG-Web CLI - Oracle to PostgreSQL conversion backed by Gemini", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Directory holding config.toml and secret.json
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Oracle code to PostgreSQL
    Convert(commands::convert::ConvertArgs),
    /// List migration kinds
    Kinds,
    /// Print the sample Oracle code
    Sample,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Kinds => {
            print!("{}", commands::kinds::render());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sample => {
            println!("{}", commands::sample::render());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Convert(args) => {
            let paths = AppPaths::new(cli.config_dir.as_deref());
            let config = ConfigService::new(paths.clone())
                .load()
                .context("Failed to load config.toml")?;

            let level = if cli.quiet {
                "error".to_string()
            } else if cli.verbose {
                "debug".to_string()
            } else {
                config.logging.level.clone()
            };
            init_tracing(TracingOptions {
                default_level: level,
                log_to_stderr: true,
                activity: None,
            })
            .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

            let secrets = EnvSecretService::new(paths);
            let generator = ora2pg_interaction::connect_gemini(&config, &secrets).await;
            let service = Arc::new(MigrationService::new(
                generator,
                ModelSettings::from_config(&config),
            ));

            commands::convert::run(args, service).await
        }
    }
}
