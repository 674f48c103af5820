use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use keyword_tables::{
    DEFAULT_KEYWORD, DEFAULT_OUTPUT_DIR, DirectorySink, DocumentInput, ExtractOptions,
    PageSelection, ResultSet, TableStrategy, archive_to_file, extract_documents,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "keyword-tables",
    version,
    about = "Export the PDF tables that contain a keyword as CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every input PDF and write one CSV per matching table.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF paths, processed in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Keyword to look for, case-insensitive.
    #[arg(short, long, default_value = DEFAULT_KEYWORD)]
    keyword: String,

    /// Directory receiving the CSV files; created when missing.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Table detection strategy: lattice (ruled tables) or stream (borderless).
    #[arg(long, default_value = "lattice")]
    strategy: String,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Bundle the CSV files into this ZIP and delete them afterwards.
    #[arg(long)]
    zip: Option<PathBuf>,

    /// Log skipped tables and other diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .context("failed to parse --pages")?;

    let strategy = TableStrategy::from_str(&args.strategy).context("failed to parse --strategy")?;

    let delimiter = u8::try_from(args.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character"))?;

    let options = ExtractOptions {
        keyword: args.keyword.clone(),
        pages,
        strategy,
        delimiter,
    };
    options.validate().context("invalid extraction options")?;
    Ok(options)
}

fn print_report(results: &ResultSet) {
    for document in &results.documents {
        for outcome in &document.outcomes {
            println!("{}", outcome.notice(&document.keyword));
        }
        println!("{}", document.notice());
    }
}

fn write_archive(results: ResultSet, path: &Path) -> Result<()> {
    let files = results.into_exported_files();
    let written = archive_to_file(&files, path)
        .with_context(|| format!("failed to write archive '{}'", path.display()))?;
    if written {
        println!("archived {} table(s) -> {}", files.len(), path.display());
    } else {
        println!("nothing to archive");
    }
    Ok(())
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let options = parse_options(args)?;
    let inputs = args
        .inputs
        .iter()
        .map(DocumentInput::from_path)
        .collect::<Vec<_>>();

    let mut sink = DirectorySink::new(&args.output_dir);
    let results = extract_documents(&inputs, &options, &mut sink);
    print_report(&results);

    if inputs.len() > 1 {
        println!(
            "total: {} table(s) exported, {} failed, {} document error(s)",
            results.len(),
            results.failure_count(),
            results.document_error_count()
        );
    }

    match &args.zip {
        Some(path) => write_archive(results, path),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Commands::Extract(args) = cli.command;

    let default_filter = if args.verbose {
        "keyword_tables=debug"
    } else {
        "keyword_tables=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run_extract(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
