use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use loanword_corpus::pipeline::skip_if_missing;
use loanword_corpus::{Pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "loanword-corpus", about = "Lexical borrowing corpus builder")]
struct Cli {
    /// Path to config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Root of the data directory, overriding the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Snapshot Wiktionary's borrowing categories.
    Scrape,

    /// Generate synthetic seeds and merge attested ones.
    Generate {
        /// Additional rule sets (JSON array)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Search Wikipedia for every seed.
    Mine {
        /// Pages requested per seed
        #[arg(long)]
        max_pages: Option<usize>,
        /// Seeds mined concurrently
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Drop English and false-positive sentences.
    Clean,

    /// Check the clean corpus against external resources.
    Validate,

    /// Run every stage in order.
    All,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Commands::Mine { max_pages, workers } = &cli.command {
        if let Some(n) = max_pages {
            config.miner.max_pages_per_seed = *n;
        }
        if let Some(n) = workers {
            config.miner.workers = *n;
        }
    }
    config.validate()?;

    let pipeline = Pipeline::new(config);
    match cli.command {
        Commands::Scrape => cmd_scrape(&pipeline)?,
        Commands::Generate { rules } => cmd_generate(&pipeline, rules)?,
        Commands::Mine { .. } => cmd_mine(&pipeline)?,
        Commands::Clean => cmd_clean(&pipeline)?,
        Commands::Validate => cmd_validate(&pipeline)?,
        Commands::All => {
            cmd_scrape(&pipeline)?;
            cmd_generate(&pipeline, None)?;
            cmd_mine(&pipeline)?;
            cmd_clean(&pipeline)?;
            cmd_validate(&pipeline)?;
        }
    }

    Ok(())
}

fn cmd_scrape(pipeline: &Pipeline) -> anyhow::Result<()> {
    let n = pipeline.scrape().context("scrape stage")?;
    info!(entries = n, "scrape done");
    Ok(())
}

fn cmd_generate(pipeline: &Pipeline, rules: Option<PathBuf>) -> anyhow::Result<()> {
    let repo = pipeline
        .generate(rules.as_deref())
        .context("generate stage")?;
    info!(seeds = repo.len(), "generate done");
    Ok(())
}

fn cmd_mine(pipeline: &Pipeline) -> anyhow::Result<()> {
    if let Some(n) = skip_if_missing("mine", pipeline.mine()).context("mine stage")? {
        info!(sentences = n, "mine done");
    }
    Ok(())
}

fn cmd_clean(pipeline: &Pipeline) -> anyhow::Result<()> {
    if let Some(report) = skip_if_missing("clean", pipeline.clean()).context("clean stage")? {
        info!(
            kept = report.kept,
            dropped_off_target = report.dropped_off_target,
            dropped_false_positive = report.dropped_false_positive,
            "clean done"
        );
    }
    Ok(())
}

fn cmd_validate(pipeline: &Pipeline) -> anyhow::Result<()> {
    if skip_if_missing("validate", pipeline.validate())
        .context("validate stage")?
        .is_some()
    {
        info!(
            report = %pipeline.config().validation_file().display(),
            "validate done"
        );
    }
    Ok(())
}
