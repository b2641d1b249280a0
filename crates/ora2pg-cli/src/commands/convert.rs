use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use ora2pg_application::{MigrationService, MigrationSession};
use ora2pg_core::{ConversionResult, DEFAULT_ORACLE_CODE, MigrationKind, SessionState};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Migration kind (SCHEMA, FUNCTION, QUERY, FULL_PACKAGE)
    #[arg(long, short, default_value_t = MigrationKind::Schema)]
    pub kind: MigrationKind,

    /// Oracle source file; `-` or omitted reads stdin
    #[arg(long, short, value_name = "FILE", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Convert the built-in sample instead of reading input
    #[arg(long)]
    pub sample: bool,

    /// Write the result to a file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also generate migration insights
    #[arg(long)]
    pub explain: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ConvertArgs, service: Arc<MigrationService>) -> Result<ExitCode> {
    let source = read_source(&args)?;

    let mut session = MigrationSession::with_state(SessionState::with_source(source), service);
    session.select_kind(args.kind);

    if !session.translate().await {
        eprintln!("Nothing to convert: the source is empty.");
        return Ok(ExitCode::SUCCESS);
    }

    if args.explain {
        session.explain().await;
    }

    deliver(&args, &ConversionResult::from_session(session.state()))
}

/// Writes the result to `--output` or stdout. A failed conversion only
/// produces output in JSON mode; the message always goes to stderr.
fn deliver(args: &ConvertArgs, result: &ConversionResult) -> Result<ExitCode> {
    let rendered = if args.json {
        serde_json::to_string_pretty(result)?
    } else {
        render_plain(result)
    };

    if let Some(error) = &result.error {
        if args.json {
            emit(args.output.as_deref(), &rendered)?;
        }
        eprintln!("{error}");
        return Ok(ExitCode::FAILURE);
    }

    emit(args.output.as_deref(), &rendered)?;
    Ok(ExitCode::SUCCESS)
}

fn emit(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => write_output(path, rendered),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn read_source(args: &ConvertArgs) -> Result<String> {
    if args.sample {
        return Ok(DEFAULT_ORACLE_CODE.to_string());
    }

    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    std::fs::write(path, format!("{rendered}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("[Convert] Wrote result to {}", path.display());
    Ok(())
}

/// PostgreSQL code, followed by the insights as a SQL comment block.
fn render_plain(result: &ConversionResult) -> String {
    let mut output = result.postgres_code.clone();
    for note in &result.notes {
        output.push_str("\n\n/* Migration Insights\n");
        output.push_str(&note.replace("*/", "* /"));
        output.push_str("\n*/");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> ConvertArgs {
        ConvertArgs {
            kind: MigrationKind::Schema,
            input: None,
            sample: false,
            output: None,
            explain: false,
            json: false,
        }
    }

    #[test]
    fn test_render_plain_without_notes() {
        let result = ConversionResult {
            postgres_code: "SELECT 1;".to_string(),
            notes: vec![],
            error: None,
        };
        assert_eq!(render_plain(&result), "SELECT 1;");
    }

    #[test]
    fn test_render_plain_keeps_notes_inside_comment() {
        let result = ConversionResult {
            postgres_code: "SELECT 1;".to_string(),
            notes: vec!["- NVL became COALESCE */ DROP".to_string()],
            error: None,
        };
        assert_eq!(
            render_plain(&result),
            "SELECT 1;\n\n/* Migration Insights\n- NVL became COALESCE * / DROP\n*/"
        );
    }

    #[test]
    fn test_read_source_from_sample_and_file() {
        let sample = ConvertArgs {
            sample: true,
            ..args()
        };
        assert_eq!(read_source(&sample).unwrap(), DEFAULT_ORACLE_CODE);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("query.sql");
        std::fs::write(&path, "SELECT SYSDATE FROM dual;").unwrap();
        let from_file = ConvertArgs {
            input: Some(path),
            ..args()
        };
        assert_eq!(read_source(&from_file).unwrap(), "SELECT SYSDATE FROM dual;");
    }

    #[test]
    fn test_failed_json_result_honors_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("result.json");
        let json = ConvertArgs {
            json: true,
            output: Some(path.clone()),
            ..args()
        };
        let result = ConversionResult {
            postgres_code: String::new(),
            notes: vec![],
            error: Some(ora2pg_core::TRANSLATION_FAILED_MESSAGE.to_string()),
        };

        deliver(&json, &result).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["error"], ora2pg_core::TRANSLATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_failed_plain_result_writes_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("result.sql");
        let plain = ConvertArgs {
            output: Some(path.clone()),
            ..args()
        };
        let result = ConversionResult {
            postgres_code: String::new(),
            notes: vec![],
            error: Some(ora2pg_core::TRANSLATION_FAILED_MESSAGE.to_string()),
        };

        deliver(&plain, &result).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_read_source_missing_file_is_an_error() {
        let missing = ConvertArgs {
            input: Some(PathBuf::from("/nonexistent/ora2pg/input.sql")),
            ..args()
        };
        let err = read_source(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
