//! FQID Humanize Command Line Interface
//!
//! # Usage
//!
//! ```bash
//! # Humanize one FQID
//! fqid_humanize bgp.prefix-visibility.asn.__AS_701
//!
//! # Per-node output as JSON, with a metadata fixture
//! fqid_humanize --metadata metadata.yaml --nodes --format json US.CA.06037
//!
//! # Read FQIDs from stdin, one per line
//! cat fqids.txt | fqid_humanize --config humanize.yaml
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;

use fqid_humanize::{
    HumanizeConfig, HumanizedOutput, Humanizer, InMemoryMetadataRepository, OutputMode,
};

#[derive(Parser)]
#[command(name = "fqid_humanize")]
#[command(version)]
#[command(about = "Resolve FQIDs into human-readable names")]
#[command(long_about = None)]
struct Cli {
    /// FQIDs to humanize (reads stdin lines if none given)
    fqids: Vec<String>,

    /// Configuration file (YAML); defaults to $FQID_HUMANIZE_CONFIG
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Metadata fixture (YAML) backing geo and ASN lookups
    #[arg(long, short)]
    metadata: Option<PathBuf>,

    /// Emit one name per node instead of a joined string
    #[arg(long)]
    nodes: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => HumanizeConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HumanizeConfig::from_env().context("loading config from environment")?,
    };

    let repo = match &cli.metadata {
        Some(path) => InMemoryMetadataRepository::load_from_file(path)
            .with_context(|| format!("loading metadata {}", path.display()))?,
        None => InMemoryMetadataRepository::new(),
    };

    let humanizer = Humanizer::from_config(&config, Arc::new(repo))?;
    let mode = if cli.nodes {
        OutputMode::PerNode
    } else {
        OutputMode::Joined
    };

    let fqids: Vec<String> = if cli.fqids.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("reading stdin")?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    } else {
        cli.fqids
    };

    for fqid in &fqids {
        let fqid = fqid.trim();
        let output = humanizer
            .humanize_fqid(fqid, mode)
            .with_context(|| format!("humanizing {}", fqid))?;
        print_output(fqid, &output, cli.format)?;
    }

    Ok(())
}

fn print_output(fqid: &str, output: &HumanizedOutput, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let line = serde_json::json!({ "fqid": fqid, "human": output });
            println!("{}", serde_json::to_string(&line)?);
        }
        OutputFormat::Text => match output {
            HumanizedOutput::Joined(name) => println!("{}\t{}", fqid, name),
            HumanizedOutput::Nodes(nodes) => {
                let names: Vec<&str> = nodes.iter().map(|n| n.as_deref().unwrap_or("")).collect();
                println!("{}\t{}", fqid, names.join("\t"));
            }
        },
    }
    Ok(())
}
