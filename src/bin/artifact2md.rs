//! CLI binary for artifact2md.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConvertConfig`, prints the run summary, and sets the exit code.

use anyhow::{Context, Result};
use artifact2md::{process, ConvertConfig, CsvMode, RunReport};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert everything under ./raw-artifacts into ./raw-artifacts/converted
  artifact2md

  # Explicit directories, recursing into subdirectories
  artifact2md --input docs/incoming --output docs/md --recursive

  # Reconvert everything, ignoring up-to-date outputs
  artifact2md --force

  # Wrap CSV files in fenced blocks instead of copying them
  artifact2md --csv-fence

  # Machine-readable summary
  artifact2md --json > report.json

SUPPORTED TYPES:
  pdf docx            library conversion; placeholder document when the
                      parser is unavailable or the file defeats it
  pptx                external tool (pandoc), slide-per-section output
  txt                 encoding-tolerant text wrap (UTF-8 / latin-1 / cp1252)
  md csv json yml yaml  copied as-is (csv optionally fenced)
  png jpg jpeg gif bmp  copied to images/, referenced from a stub document

EXIT STATUS:
  0  no file landed in the error list (placeholder skips are fine)
  1  at least one conversion error was recorded

The external tool is only required for PPTX files. Install it with your
package manager (e.g. `apt install pandoc` / `brew install pandoc`)."#;

/// Convert a directory of mixed document artifacts to Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "artifact2md",
    version,
    about = "Convert a directory of mixed document artifacts to Markdown",
    long_about = "Scan a directory of heterogeneous document artifacts (PDF, DOCX, PPTX, TXT, \
CSV, Markdown, JSON, YAML, images) and convert each into a Markdown representation, mirroring \
the relative directory structure into an output tree.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory holding the raw artifacts.
    #[arg(short, long, env = "ARTIFACT2MD_INPUT", default_value = "raw-artifacts")]
    input: PathBuf,

    /// Output directory (defaults to <input>/converted).
    #[arg(short, long, env = "ARTIFACT2MD_OUTPUT")]
    output: Option<PathBuf>,

    /// Recurse into subdirectories, mirroring their structure.
    #[arg(short, long, env = "ARTIFACT2MD_RECURSIVE")]
    recursive: bool,

    /// Reconvert files even when the output is newer than the input.
    #[arg(short, long, env = "ARTIFACT2MD_FORCE")]
    force: bool,

    /// Wrap CSV content in a fenced code block instead of copying the file.
    #[arg(long, env = "ARTIFACT2MD_CSV_FENCE")]
    csv_fence: bool,

    /// External conversion tool used for PPTX files.
    #[arg(long, env = "ARTIFACT2MD_TOOL", default_value = "pandoc")]
    pandoc: String,

    /// Timeout for one external tool invocation, in seconds.
    #[arg(long, env = "ARTIFACT2MD_TOOL_TIMEOUT", default_value_t = 60)]
    tool_timeout: u64,

    /// Print the run report as JSON instead of the human summary.
    #[arg(long, env = "ARTIFACT2MD_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ARTIFACT2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ARTIFACT2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConvertConfig::builder(&cli.input)
        .recursive(cli.recursive)
        .incremental(!cli.force)
        .tool_program(cli.pandoc.as_str())
        .tool_timeout_secs(cli.tool_timeout);
    if let Some(ref output) = cli.output {
        builder = builder.output_dir(output);
    }
    if cli.csv_fence {
        builder = builder.csv_mode(CsvMode::Fenced);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let report = process(&config).await.context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        print_summary(&report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Human-readable summary on stderr: the three counts, plus the documents
/// waiting on manual conversion when there are any.
fn print_summary(report: &RunReport) {
    eprintln!("{}", dim(&"=".repeat(50)));
    eprintln!(
        "{} {}",
        if report.is_success() {
            green("✔")
        } else {
            red("✘")
        },
        bold("Conversion complete")
    );
    eprintln!("   Converted: {}", bold(&report.converted_count().to_string()));
    eprintln!("   Skipped:   {}", bold(&report.skipped_count().to_string()));
    eprintln!(
        "   Errors:    {}",
        if report.error_count() == 0 {
            bold("0")
        } else {
            red(&report.error_count().to_string())
        }
    );

    let manual = report.manual_conversion_outputs();
    if !manual.is_empty() {
        eprintln!();
        eprintln!(
            "{} {} file(s) need manual conversion:",
            yellow("⚠"),
            manual.len()
        );
        for path in manual {
            eprintln!("   {}", dim(&path.display().to_string()));
        }
    }

    for err in &report.errors {
        eprintln!("{} {}", red("✗"), err);
    }
    eprintln!("{}", dim(&"=".repeat(50)));
}
