//! Command implementations for the query-lattice CLI.

use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::analysis::service::{AnalysisRequest, AnalysisService};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalysisConfig;
use crate::error::{LatticeError, Result};

/// Execute a CLI command, writing to stdout.
pub fn execute_command(args: QueryLatticeArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args, &mut out)
}

/// Execute a CLI command against any writer.
pub fn run_command(args: &QueryLatticeArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args)?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, config, args, out),
        Command::Index(index_args) => index(index_args, config, args, out),
        Command::Diagram(diagram_args) => diagram(diagram_args, config, args, out),
        Command::Batch(batch_args) => batch(batch_args, config, args, out),
    }
}

fn load_config(args: &QueryLatticeArgs) -> Result<AnalysisConfig> {
    match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            AnalysisConfig::from_file(path)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Read an analyzer response from a file, or stdin for "-".
fn read_response(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read(path)?)
    }
}

/// Search view of one response.
fn analyze(
    args: &AnalyzeArgs,
    mut config: AnalysisConfig,
    cli_args: &QueryLatticeArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(stage) = &args.stage {
        config = config.with_search_stage(stage.clone());
    }
    if args.no_diagram {
        config.include_diagram = false;
    }
    config.validate()?;

    let raw = read_response(&args.response)?;
    let service = AnalysisService::new(config);
    let analysis = service.analyze_search(&raw, &args.query)?;

    output_result(out, "Analysis complete", &analysis, cli_args)
}

/// Index view of one response.
fn index(
    args: &IndexArgs,
    mut config: AnalysisConfig,
    cli_args: &QueryLatticeArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(stage) = &args.stage {
        config = config.with_index_stage(stage.clone());
    }
    config.validate()?;

    let raw = read_response(&args.response)?;
    let service = AnalysisService::new(config);
    let analysis = service.analyze_index(&raw, &args.query)?;

    output_result(out, "Index analysis complete", &analysis, cli_args)
}

/// Diagram of one stage.
fn diagram(
    args: &DiagramArgs,
    mut config: AnalysisConfig,
    cli_args: &QueryLatticeArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(format) = args.diagram_format {
        config.diagram_format = format.into();
    }
    let stage = args
        .stage
        .clone()
        .unwrap_or_else(|| config.search_stage.clone());
    if stage.trim().is_empty() {
        return Err(LatticeError::config("stage must not be empty"));
    }

    let raw = read_response(&args.response)?;
    let format = config.diagram_format;
    let service = AnalysisService::new(config);
    let diagram = service.diagram(&raw, &args.query, &stage)?;

    output_result(
        out,
        "Diagram rendered",
        &DiagramOutput {
            original_query: args.query.clone(),
            stage,
            format,
            diagram,
        },
        cli_args,
    )
}

/// Parallel search view over a JSONL file.
fn batch(
    args: &BatchArgs,
    config: AnalysisConfig,
    cli_args: &QueryLatticeArgs,
    out: &mut dyn Write,
) -> Result<()> {
    config.validate()?;
    let start_time = Instant::now();

    let reader = BufReader::new(fs::File::open(&args.input)?);
    let mut entries = Vec::new();
    let mut requests = Vec::new();
    // Index into `entries` for each request, so results land on their line.
    let mut slots = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<AnalysisRequest>(&line) {
            Ok(request) => {
                slots.push(entries.len());
                entries.push(BatchEntry {
                    line: line_num + 1,
                    query: request.query.clone(),
                    analysis: None,
                    error: None,
                });
                requests.push(request);
            }
            Err(e) => {
                if args.fail_fast {
                    return Err(LatticeError::parse(
                        format!("line {} is not a batch request", line_num + 1),
                        e,
                    ));
                }
                warn!(line = line_num + 1, error = %e, "skipping malformed batch line");
                entries.push(BatchEntry {
                    line: line_num + 1,
                    query: String::new(),
                    analysis: None,
                    error: Some(format!("invalid request: {e}")),
                });
            }
        }
    }

    let service = AnalysisService::new(config);
    let results = service.analyze_batch(&requests);

    for (slot, result) in slots.into_iter().zip(results) {
        match result {
            Ok(analysis) => entries[slot].analysis = Some(analysis),
            Err(e) if args.fail_fast => return Err(e),
            Err(e) => entries[slot].error = Some(e.to_string()),
        }
    }

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let duration = start_time.elapsed();
    info!(
        total = entries.len(),
        failed,
        duration_ms = duration.as_millis() as u64,
        "batch finished"
    );

    output_result(
        out,
        "Batch analysis complete",
        &BatchResults {
            total: entries.len(),
            failed,
            duration_ms: duration.as_millis() as u64,
            entries,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse_args(argv: &[&str]) -> QueryLatticeArgs {
        let mut full = vec!["query-lattice"];
        full.extend_from_slice(argv);
        QueryLatticeArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_load_config_defaults_without_flag() {
        let args = parse_args(&["analyze", "response.json", "q"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.search_stage, "synonym_filter");
        assert_eq!(config.index_stage, "stopword_filter");
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"index_stage": "lowercase"}"#).unwrap();
        let path = path.to_string_lossy().to_string();

        let args = parse_args(&["--config", &path, "analyze", "response.json", "q"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.index_stage, "lowercase");
        assert_eq!(config.search_stage, "synonym_filter");
    }

    #[test]
    fn test_read_response_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("response.json");
        fs::write(&path, b"{}").unwrap();

        assert_eq!(read_response(&path).unwrap(), b"{}".to_vec());
    }

    #[test]
    fn test_read_response_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_response(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LatticeError::Io(_)));
    }
}
