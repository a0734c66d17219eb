//! Organizatext CLI

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use organizatext::export::{ExportEntry, default_archive_name, default_metadata_name, export_metadata, export_zip_to_path};
use organizatext::validation::{FileSummary, validate_files};
use organizatext::{
    FileProcessor, HeuristicRecognizer, InputFile, OrganizatextConfig, PoolRegistry, ProcessOutcome, ProgressCallback,
    ProgressEvent, extract_keywords,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "organizatext")]
#[command(version, about = "Organize plain-text documents: keywords, contacts, PII flags and exports", long_about = None)]
struct Cli {
    /// Configuration file (.toml, .yaml, .yml or .json). Defaults to a discovered organizatext.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse files with the worker pool and print one result per file
    Analyze {
        /// Text files to analyse
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of workers (overrides the configuration)
        #[arg(short, long)]
        pool_size: Option<usize>,

        /// Recognize person, place, organization and date entities
        #[arg(long)]
        entities: bool,

        /// Skip upload limit checks
        #[arg(long)]
        skip_validation: bool,
    },

    /// Print the RAKE keywords of a file
    Keywords {
        file: PathBuf,

        /// Number of keywords (overrides the configuration)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Check files against the upload limits
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Analyse files and export them as a ZIP archive grouped by category
    Export {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path (default: organizatext-export-YYYYMMDD.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Category for every exported file
        #[arg(long)]
        category: Option<String>,

        /// Write only the metadata as JSON
        #[arg(long)]
        metadata_only: bool,

        /// Number of workers (overrides the configuration)
        #[arg(short, long)]
        pool_size: Option<usize>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "organizatext=debug,organizatext_cli=debug"
    } else {
        "organizatext=info,organizatext_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<OrganizatextConfig> {
    let config = match path {
        Some(path) => OrganizatextConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => OrganizatextConfig::discover()?.unwrap_or_default(),
    };
    Ok(config)
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = InputFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

fn check_limits(files: &[InputFile], config: &OrganizatextConfig) -> Result<()> {
    let report = validate_files(files, &config.limits);
    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }
    if !report.valid {
        bail!("File selection rejected: {}", report.errors.join("; "));
    }
    Ok(())
}

fn build_registry(config: &OrganizatextConfig, pool_size: Option<usize>, entities: bool) -> PoolRegistry {
    let mut pool_config = config.pool.clone();
    if let Some(size) = pool_size {
        pool_config.pool_size = size;
    }

    let mut processor = FileProcessor::new(config.keywords.clone(), config.processing.clone());
    if entities {
        processor = processor.with_entity_recognizer(Arc::new(HeuristicRecognizer));
    }
    PoolRegistry::new(pool_config, processor)
}

fn progress_logger() -> ProgressCallback {
    Arc::new(|event: &ProgressEvent| {
        tracing::debug!(file_id = %event.file_id, status = ?event.status, "Processing file");
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            files,
            pool_size,
            entities,
            skip_validation,
        } => {
            let inputs = read_files(&files).await?;
            if !skip_validation {
                check_limits(&inputs, &config)?;
            }

            let registry = build_registry(&config, pool_size, entities);
            let pool = registry.get_or_init();
            let report = pool.process_batch(inputs, Some(progress_logger())).await;
            registry.shutdown();

            println!("{}", serde_json::to_string_pretty(&report)?);
            eprintln!("Processed: {}, failed: {}", report.processed, report.failed);
            Ok(())
        }

        Commands::Keywords { file, top } => {
            let input = InputFile::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let text = input.text(config.processing.strict_utf8)?;

            let mut keyword_config = config.keywords.clone();
            if let Some(top) = top {
                keyword_config.max_keywords = top;
            }

            let keywords = extract_keywords(&text, &keyword_config);
            println!("{}", serde_json::to_string_pretty(&keywords)?);
            Ok(())
        }

        Commands::Validate { files } => {
            let mut summaries = Vec::with_capacity(files.len());
            for path in &files {
                let metadata =
                    std::fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                summaries.push(FileSummary::new(name, metadata.len()));
            }

            let report = validate_files(&summaries, &config.limits);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.valid {
                bail!("{} validation error(s)", report.errors.len());
            }
            Ok(())
        }

        Commands::Export {
            files,
            output,
            category,
            metadata_only,
            pool_size,
        } => {
            let inputs = read_files(&files).await?;
            check_limits(&inputs, &config)?;

            let contents: Vec<Vec<u8>> = inputs.iter().map(|f| f.data.clone()).collect();
            let registry = build_registry(&config, pool_size, false);
            let pool = registry.get_or_init();
            let report = pool.process_batch(inputs, Some(progress_logger())).await;
            registry.shutdown();

            let mut entries = Vec::new();
            for (completion, content) in report.results.into_iter().zip(contents) {
                match completion.result {
                    ProcessOutcome::Processed(record) => {
                        let mut entry = ExportEntry::new(*record, Some(content));
                        if let Some(category) = &category {
                            entry = entry.with_category(category.clone());
                        }
                        entries.push(entry);
                    }
                    ProcessOutcome::Failed { error, file_name } => {
                        tracing::warn!(file = %file_name, "Not exported, processing failed: {}", error);
                    }
                }
            }

            if metadata_only {
                let output = output.unwrap_or_else(|| PathBuf::from(default_metadata_name()));
                let metadata = export_metadata(&entries);
                std::fs::write(&output, serde_json::to_string_pretty(&metadata)?)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                eprintln!("Wrote metadata for {} file(s) to {}", entries.len(), output.display());
            } else {
                let output = output.unwrap_or_else(|| PathBuf::from(default_archive_name()));
                let summary = export_zip_to_path(&entries, &output)?;
                eprintln!(
                    "Exported {} file(s) in {} categor(ies) to {} ({} bytes)",
                    summary.files_written,
                    summary.categories.len(),
                    output.display(),
                    summary.archive_size
                );
            }
            Ok(())
        }

        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
