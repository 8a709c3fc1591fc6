use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fastlane_meta_extract::parse_options_source;
use fastlane_meta_extract::pipeline::{PipelineConfig, run_and_write};
use fastlane_meta_extract::source::DirectorySource;
use fastlane_meta_extract::writer::WriteOutcome;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fastlane-meta")]
#[command(about = "Fastlane option metadata extraction")]
struct Cli {
    /// Enable debug-level logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the metadata document from a local fastlane source layout.
    Generate(GenerateArgs),
    /// Parse a single options source file and print its arguments.
    ParseFile(ParseFileArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Directory with per-tool options files (`<dir>/<tool>.rb`) and an
    /// optional `actions/` subdirectory.
    #[arg(long)]
    source_dir: PathBuf,
    /// Output path for the metadata JSON document.
    #[arg(long)]
    output: PathBuf,
    /// Comma-separated tool names (default: the built-in fastlane tool set).
    #[arg(long)]
    tools: Option<String>,
    /// Number of parallel fetch jobs (default: adaptive).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Tool or action name the source belongs to.
    #[arg(long)]
    tool: String,
    /// Path to the Ruby options source file.
    #[arg(long)]
    input: PathBuf,
    /// Treat the source as an auto-discovered action.
    #[arg(long)]
    action: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::ParseFile(args) => run_parse_file(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    if !args.source_dir.is_dir() {
        return Err(format!(
            "--source-dir {} is not a directory",
            args.source_dir.display()
        ));
    }

    let source = DirectorySource::new(&args.source_dir);
    let mut config = PipelineConfig {
        url_template: source.url_template(),
        jobs: args.jobs,
        ..PipelineConfig::default()
    };
    let tools = parse_csv_list(args.tools);
    if !tools.is_empty() {
        config.tools = tools;
    }

    let (outcome, write) =
        run_and_write(&config, &source, &source, &args.output).map_err(|err| err.to_string())?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    match write {
        WriteOutcome::Created(path) => {
            println!(
                "Wrote {} ({} tasks)",
                path.display(),
                outcome.document.tasks.len()
            );
        }
        WriteOutcome::Unchanged => println!("Metadata is already up to date"),
        WriteOutcome::Diverged(path) => {
            println!(
                "Existing metadata differs; new version written to {}",
                path.display()
            );
        }
    }
    Ok(())
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read {}: {err}", args.input.display()))?;

    let parse = parse_options_source(&args.tool, &text, args.action);
    for warning in &parse.warnings {
        eprintln!("warning: {warning}");
    }

    let rendered =
        serde_json::to_string_pretty(&parse.arguments).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
