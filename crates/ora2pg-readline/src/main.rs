use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use ora2pg_application::{MigrationService, ModelSettings};
use ora2pg_execution::{ActivityLayer, JobExecutor, LOG_ENV_VAR, TracingOptions, init_tracing};
use ora2pg_infrastructure::{AppPaths, ConfigService, EnvSecretService};

mod app;
mod clipboard;
mod commands;
mod helper;
mod reader;
mod render;

use app::{Flow, ReplApp};
use helper::CliHelper;
use reader::InputEvent;

/// Interactive Ora2PG-Web session.
///
/// Requests run on background tasks; the loop below owns the session state
/// and selects over user input, finished jobs and log activity, so the
/// prompt stays usable while a conversion is in flight.
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let paths = AppPaths::new(None);
    let config = ConfigService::new(paths.clone()).load()?;

    let (activity_layer, mut activity_rx) = ActivityLayer::channel();
    init_tracing(session_tracing(
        activity_layer,
        std::env::var_os(LOG_ENV_VAR).is_some(),
    ))
    .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    let secrets = EnvSecretService::new(paths);
    let generator = ora2pg_interaction::connect_gemini(&config, &secrets).await;
    let service = Arc::new(MigrationService::new(
        generator,
        ModelSettings::from_config(&config),
    ));
    let (executor, mut outcomes) = JobExecutor::new(service);
    let mut app = ReplApp::new(executor);

    // ===== REPL Setup =====
    println!("{}", "=== Ora2PG-Web ===".bright_magenta().bold());
    println!(
        "{}",
        "Oracle to PostgreSQL migration. Type '/help' for commands or 'quit' to exit."
            .bright_black()
    );
    println!();
    println!("{}", render::source_panel(app.state()));
    println!();

    let (mut input_rx, prompt_tx) = reader::spawn(CliHelper::new());
    prompt_tx.send(app.prompt())?;

    // ===== Main REPL Loop =====
    loop {
        tokio::select! {
            input = input_rx.recv() => {
                let Some(input) = input else { break };
                match input {
                    InputEvent::Line(line) => {
                        if app.handle_line(&line) == Flow::Quit {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                    }
                    InputEvent::Interrupted => {
                        println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                    }
                    InputEvent::Eof => {
                        println!("{}", "CTRL-D detected. Exiting...".bright_green());
                        break;
                    }
                    InputEvent::Failed(err) => {
                        eprintln!("{}", format!("Error: {err}").red());
                        break;
                    }
                }
                if prompt_tx.send(app.prompt()).is_err() {
                    break;
                }
            }
            Some(outcome) = outcomes.recv() => {
                app.apply(outcome);
                // rustyline still shows the prompt it was given before the job finished
                print!("{}", app.prompt());
                let _ = std::io::stdout().flush();
            }
            Some(event) = activity_rx.recv() => {
                if app.verbose() {
                    println!("{}", render::activity(&event));
                }
            }
        }
    }

    Ok(())
}

/// The interactive session keeps stderr quiet unless `ORA2PG_LOG` is set, so
/// `[logging] level` from config.toml only applies to the `ora2pg` CLI.
/// Activity reaches the session through `/verbose` instead.
fn session_tracing(activity: ActivityLayer, log_env_set: bool) -> TracingOptions {
    TracingOptions {
        default_level: String::new(),
        log_to_stderr: log_env_set,
        activity: Some(activity),
    }
}
