//! Parse lab report documents into structured result rows.
//!
//! Each input is parsed on its own; a document that fails is reported on
//! stderr and the rest of the batch still runs. Reports are emitted ordered
//! by collection date, undated reports last.
//!
//! Usage:
//!   parse_lab_report [--format json|markdown|csv] [--config FILE]
//!                    [--output-dir DIR] [--verbose] FILE...

use lab_oxide::converters::{convert, OutputFormat};
use lab_oxide::{parse_lab_report_file, LabReport, ParserConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "Usage: parse_lab_report [--format json|markdown|csv] [--config FILE] [--output-dir DIR] [--verbose] FILE...";

struct CliConfig {
    inputs: Vec<PathBuf>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut cli = Self {
            inputs: vec![],
            format: OutputFormat::default(),
            config_path: None,
            output_dir: None,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--format" | "-f" => {
                    i += 1;
                    let value = args.get(i).ok_or("--format needs a value")?;
                    cli.format = value.parse().map_err(|e| format!("{}", e))?;
                },
                "--config" | "-c" => {
                    i += 1;
                    let value = args.get(i).ok_or("--config needs a value")?;
                    cli.config_path = Some(PathBuf::from(value));
                },
                "--output-dir" | "-o" => {
                    i += 1;
                    let value = args.get(i).ok_or("--output-dir needs a value")?;
                    cli.output_dir = Some(PathBuf::from(value));
                },
                "--verbose" | "-v" => {
                    cli.verbose = true;
                },
                "--help" | "-h" => {
                    return Err(USAGE.to_string());
                },
                flag if flag.starts_with('-') => {
                    return Err(format!("Unknown option {}\n{}", flag, USAGE));
                },
                input => cli.inputs.push(PathBuf::from(input)),
            }
            i += 1;
        }

        if cli.inputs.is_empty() {
            return Err(USAGE.to_string());
        }
        Ok(cli)
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
}

fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    dir.join(format!("{}.{}", stem, format.extension()))
}

fn main() -> ExitCode {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        },
    };
    init_logging(cli.verbose);

    let config = match &cli.config_path {
        Some(path) => match ParserConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::from(2);
            },
        },
        None => ParserConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error creating {}: {}", dir.display(), e);
            return ExitCode::from(2);
        }
    }

    let mut failed = 0;
    let mut reports: Vec<(&Path, LabReport)> = vec![];
    for input in &cli.inputs {
        match parse_lab_report_file(input, &config) {
            Ok(report) => {
                log::info!("{}: {} rows", input.display(), report.rows.len());
                reports.push((input, report));
            },
            Err(e) => {
                eprintln!("Error parsing {}: {}", input.display(), e);
                failed += 1;
            },
        }
    }

    // Stable: undated reports keep input order after the dated ones
    reports.sort_by_key(|(_, report)| {
        let date = report.sample.collected_on();
        (date.is_none(), date)
    });

    for (input, report) in &reports {
        let rendered = match convert(report, cli.format) {
            Ok(rendered) => rendered,
            Err(e) => {
                eprintln!("Error rendering {}: {}", input.display(), e);
                failed += 1;
                continue;
            },
        };
        match &cli.output_dir {
            Some(dir) => {
                let path = output_path(dir, input, cli.format);
                if let Err(e) = fs::write(&path, rendered) {
                    eprintln!("Error writing {}: {}", path.display(), e);
                    failed += 1;
                } else if cli.verbose {
                    eprintln!("{} -> {}", input.display(), path.display());
                }
            },
            None => println!("{}", rendered),
        }
    }

    if failed > 0 {
        eprintln!("{} of {} documents failed", failed, cli.inputs.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
