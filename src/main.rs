//! dataharvest CLI
//!
//! Entry point for harvest jobs: cleaning, extraction, delta detection,
//! aggregation, crawling, and config validation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use dataharvest::config::Config;
use dataharvest::core::aggregate::DataAggregator;
use dataharvest::core::cleaner::normalize_text;
use dataharvest::core::extractor::EntityExtractor;
use dataharvest::core::processor::ParallelBatchProcessor;
use dataharvest::crawler::{CrawlEngine, HarvestPipeline, PageSpider};
use dataharvest::storage::DeltaDetector;
use dataharvest::utils::{files, logging};

#[derive(Parser)]
#[command(name = "harvest", version, about = "dataharvest ETL toolkit")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "harvest.yaml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to a file instead of the console
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize text files from a directory into an output directory
    Clean {
        /// Directory of input files
        input: PathBuf,
        /// Directory for cleaned output
        #[arg(short, long)]
        output: PathBuf,
        /// Only clean files with this extension
        #[arg(long)]
        extension: Option<String>,
    },
    /// Extract entities from a text file and print them as JSON
    Extract {
        /// Input file
        input: PathBuf,
    },
    /// Report new/modified/unchanged files under a directory
    Delta {
        /// Directory to scan
        directory: PathBuf,
        /// Digest store location
        #[arg(long, default_value = "hashes.json")]
        hash_file: PathBuf,
        /// Only consider files with this extension
        #[arg(long)]
        extension: Option<String>,
    },
    /// Aggregate JSON files under a directory into one record array
    Aggregate {
        /// Directory to aggregate
        directory: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Crawl a set of URLs and print scraped items as JSON
    Crawl {
        /// Seed URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Load and validate the configuration file
    ValidateConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_init = match &cli.log_file {
        Some(path) => logging::init_with_file(cli.verbose, path),
        None => {
            logging::init(cli.verbose);
            Ok(())
        }
    };
    if let Err(e) = log_init {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)?;
    info!("dataharvest started with config: {}", cli.config.display());

    match cli.command {
        Command::Clean {
            input,
            output,
            extension,
        } => clean(&config, &input, &output, extension.as_deref()),
        Command::Extract { input } => extract(&input),
        Command::Delta {
            directory,
            hash_file,
            extension,
        } => delta(&directory, &hash_file, extension.as_deref()),
        Command::Aggregate { directory, output } => aggregate(&directory, &output),
        Command::Crawl { urls } => crawl(&config, urls).await,
        Command::ValidateConfig => {
            // load_config already validated; reaching this point means it passed
            println!("Configuration OK: {}", cli.config.display());
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        warn!(
            "Config file {} not found, falling back to environment",
            path.display()
        );
        Ok(Config::from_env()?)
    }
}

fn build_processor(config: &Config) -> anyhow::Result<ParallelBatchProcessor> {
    Ok(match config.processing().workers {
        Some(workers) => ParallelBatchProcessor::with_workers(workers)?,
        None => ParallelBatchProcessor::new(),
    })
}

fn clean(
    config: &Config,
    input: &Path,
    output: &Path,
    extension: Option<&str>,
) -> anyhow::Result<()> {
    let inputs = files::list_files(input, extension);
    if inputs.is_empty() {
        warn!("No input files found under {}", input.display());
        return Ok(());
    }

    std::fs::create_dir_all(output)?;
    let processor = build_processor(config)?;
    let output = output.to_path_buf();

    let cleaned = processor.try_process_batch(
        move |path: PathBuf| -> std::result::Result<PathBuf, std::io::Error> {
            let content = std::fs::read_to_string(&path)?;
            let target = output.join(path.file_name().unwrap_or(path.as_os_str()));
            std::fs::write(&target, normalize_text(&content))?;
            Ok(target)
        },
        inputs,
    )?;

    info!("Cleaned {} files", cleaned.len());
    Ok(())
}

fn extract(input: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)?;
    let extractor = EntityExtractor::new();
    let grouped = extractor.extract_entities_grouped(&content);
    println!("{}", serde_json::to_string_pretty(&grouped)?);
    Ok(())
}

fn delta(directory: &Path, hash_file: &Path, extension: Option<&str>) -> anyhow::Result<()> {
    let mut detector = DeltaDetector::new(hash_file);
    let report = detector.scan_directory(directory, extension);
    detector.save_hashes()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn aggregate(directory: &Path, output: &Path) -> anyhow::Result<()> {
    let aggregator = DataAggregator::new();
    let records = aggregator.aggregate_directory(directory);
    let file = std::fs::File::create(output)?;
    serde_json::to_writer_pretty(file, &records)?;
    info!("Saved {} records to {}", records.len(), output.display());
    Ok(())
}

async fn crawl(config: &Config, urls: Vec<String>) -> anyhow::Result<()> {
    let engine = CrawlEngine::new(config.crawler().clone())?;
    let spider = PageSpider::new("harvest", urls);
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
