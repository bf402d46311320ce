use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sarifbridge::config::Config;
use sarifbridge::error::BridgeError;
use sarifbridge::parser::{analyzer_for, Family};
use sarifbridge::{convert, render_report, ConvertOptions};

#[derive(Parser)]
#[command(
    name = "sarifbridge",
    about = "Normalize static-analyzer output into SARIF 2.1.0",
    version,
    author
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an analyzer and convert its output to SARIF
    Convert {
        /// Analyzer family (codespell, cppcheck)
        analyzer: String,

        /// Path to the project to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Analyzer command to run instead of the family default
        #[arg(long, short = 'c')]
        command: Option<String>,

        /// Analyzer arguments (space-separated) instead of the family default
        #[arg(long, short = 'a')]
        args: Option<String>,

        /// uriBaseId token for SARIF artifact locations
        #[arg(long, short = 'u')]
        base_uri: Option<String>,

        /// Prefix prepended to every emitted file path
        #[arg(long, short = 'p', default_value = "")]
        prefix: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the SARIF document to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List registered analyzer families
    ListAnalyzers,

    /// Generate a starter .sarifbridge.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Convert {
            analyzer,
            path,
            command,
            args,
            base_uri,
            prefix,
            config,
            output,
        } => cmd_convert(analyzer, path, command, args, base_uri, prefix, config, output),
        Commands::ListAnalyzers => cmd_list_analyzers(),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(e.exit_code());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    analyzer_str: String,
    path: PathBuf,
    command: Option<String>,
    args: Option<String>,
    base_uri: Option<String>,
    prefix: String,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<i32, BridgeError> {
    let family = Family::from_str_lenient(&analyzer_str)
        .ok_or_else(|| BridgeError::UnknownAnalyzer(analyzer_str))?;

    let options = ConvertOptions {
        command,
        args,
        base_uri,
        prefix,
        config_path: config,
    };

    let report = convert(&path, family, &options)?;
    let rendered = render_report(&report)?;
    sarifbridge::output::write(&rendered, output.as_deref())?;

    Ok(0)
}

fn cmd_list_analyzers() -> Result<i32, BridgeError> {
    println!(
        "{:<12} {:<10} {:<12} {:<12} ARGS",
        "FAMILY", "TOOL", "CHANNEL", "COMMAND"
    );
    println!("{}", "-".repeat(60));
    for &family in Family::all() {
        let analyzer = analyzer_for(family);
        println!(
            "{:<12} {:<10} {:<12} {:<12} {}",
            family.to_string(),
            analyzer.tool_name(),
            analyzer.channel().to_string(),
            analyzer.default_command(),
            analyzer.default_args(),
        );
    }
    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, BridgeError> {
    let path = PathBuf::from(".sarifbridge.toml");

    if path.exists() && !force {
        eprintln!(".sarifbridge.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .sarifbridge.toml");

    Ok(0)
}
