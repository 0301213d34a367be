//! CLI for citesort - Sort citation keys in LaTeX documents.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use citesort::document::line_number;
use citesort::{inspect, read_document, render_text, transform, write_document, SourceError};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Sort the keys inside LaTeX citation commands by author and year
#[derive(Parser)]
#[command(name = "citesort")]
#[command(version)]
#[command(after_help = "\
Examples:
  citesort sort paper.tex
  citesort sort paper.tex -o paper.sorted.tex
  cat paper.tex | citesort sort -
  citesort sort --check paper.tex
  citesort inspect paper.tex --json")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort the keys of every citation command in a document
    #[command(after_help = "\
Examples:
  citesort sort paper.tex > sorted.tex
  citesort sort paper.tex -o sorted.tex
  citesort sort --check paper.tex

Keys are ordered by author name, then year: \\cite{smith2021,doe2010} becomes \\cite{doe2010,smith2021}")]
    Sort {
        /// Input LaTeX file (use '-' for stdin)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, conflicts_with = "check")]
        output: Option<PathBuf>,

        /// Don't write anything; exit with status 1 if any command is unsorted
        #[arg(long)]
        check: bool,

        /// Don't print the summary line when writing to a file
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show every citation command with the rank of each key
    Inspect {
        /// Input LaTeX file (use '-' for stdin)
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 1 — `--check` found unsorted citation commands
    Unsorted(usize),
    /// Exit 10 — input file not found / unreadable
    InputFile(SourceError),
    /// Exit 15 — cannot write output
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Unsorted(_) => 1,
            AppError::InputFile(_) => 10,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unsorted(count) => {
                write!(
                    f,
                    "{} citation command(s) not sorted\n  hint: run without --check to rewrite them",
                    count
                )
            }
            AppError::InputFile(e) => {
                write!(f, "{}\n  hint: verify the file path is correct", e)
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logger(verbose: u8) {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        logger.filter_level(level);
    }
    logger.init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Sort {
            input,
            output,
            check,
            quiet,
        } => {
            if check {
                check_command(&input)?;
            } else {
                sort_command(&input, output.as_deref(), quiet)?;
            }
        }
        Commands::Inspect { input, json } => {
            inspect_command(&input, json)?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Sort the citation keys of a document and write the result.
fn sort_command(input: &Path, output: Option<&Path>, quiet: bool) -> Result<(), AppError> {
    let document = read_document(input).map_err(AppError::InputFile)?;
    log::info!("read {} byte(s) from {}", document.len(), input.display());

    let result = transform(&document);

    write_document(output, &result.output).map_err(|e| AppError::OutputFile(e.to_string()))?;

    if let Some(output_path) = output {
        if !quiet {
            eprintln!(
                "reordered {} of {} citation command(s), wrote {}",
                result.changes.len(),
                result.commands,
                output_path.display()
            );
        }
    }

    Ok(())
}

/// Report unsorted citation commands without writing anything.
fn check_command(input: &Path) -> Result<(), AppError> {
    let document = read_document(input).map_err(AppError::InputFile)?;
    let result = transform(&document);

    if result.is_unchanged() {
        log::info!("{} citation command(s) already sorted", result.commands);
        return Ok(());
    }

    let name = input.display();
    for change in &result.changes {
        let (start, end) = change.span;
        eprintln!(
            "{}:{}: {}",
            name,
            line_number(&document, start),
            &document[start..end]
        );
    }

    Err(AppError::Unsorted(result.changes.len()))
}

/// Print each citation command with its keys and their ranks.
fn inspect_command(input: &Path, json: bool) -> Result<(), AppError> {
    let document = read_document(input).map_err(AppError::InputFile)?;
    let commands = inspect(&document);

    let rendered = if json {
        let mut text = serde_json::to_string_pretty(&commands)
            .map_err(|e| AppError::OutputFile(format!("failed to encode JSON: {}", e)))?;
        text.push('\n');
        text
    } else {
        render_text(&commands)
    };

    write_document(None, &rendered).map_err(|e| AppError::OutputFile(e.to_string()))
}
