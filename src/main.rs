//! gdb-schema-export CLI - Command-line interface for geodatabase schema exports
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates subcommands to artifact groups and exporter operations
//! - Handles external concerns like config discovery, process exit codes, and terminal output
//! - Keeps extraction and rendering inside the library

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gdb_schema_export::config::DEFAULT_CONFIG_FILES;
use gdb_schema_export::{ArtifactGroup, ConfigBuilder, ExportConfig, ExportRun, SchemaExporter};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "colors")]
use colored::Colorize;

/// gdb-schema-export - Field and domain references from geodatabase XML
#[derive(Parser)]
#[command(name = "gdb-schema-export")]
#[command(version)]
#[command(about = "Export field and domain metadata from a geodatabase XML workspace document")]
#[command(long_about = "Reads an XML workspace export, extracts the fields of one feature class together with the attribute domains they reference, and writes CSV, JSON and HTML references from a single parse of the document.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(flatten)]
    overrides: Overrides,
}

/// Flags that take precedence over the configuration file
#[derive(Args, Clone, Default)]
struct Overrides {
    /// XML workspace export to read
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Feature class to extract
    #[arg(short, long, global = true)]
    feature_class: Option<String>,

    /// Directory artifacts are written to
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write domain values as CSV and JSON
    Domains,

    /// Write one column per domain field, with and without codes
    Columnar,

    /// Write complete field metadata as CSV and JSON
    Metadata,

    /// Write the field summary and domain details tables
    Fields,

    /// Write the HTML attribute reference manual
    Manual,

    /// Write every artifact plus the export manifest
    All,

    /// Print schema statistics for the feature class
    Inspect {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check anchors and table of contents links of an HTML manual
    CheckManual {
        /// Manual to check (defaults to the configured manual path)
        path: Option<PathBuf>,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

impl Commands {
    fn artifact_group(&self) -> Option<ArtifactGroup> {
        match self {
            Commands::Domains => Some(ArtifactGroup::Domains),
            Commands::Columnar => Some(ArtifactGroup::Columnar),
            Commands::Metadata => Some(ArtifactGroup::Metadata),
            Commands::Fields => Some(ArtifactGroup::Fields),
            Commands::Manual => Some(ArtifactGroup::Manual),
            Commands::All => Some(ArtifactGroup::All),
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    configure_colors(!cli.no_color);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> Result<i32> {
    let use_colors = !cli.no_color;

    if let Some(group) = cli.command.artifact_group() {
        let config = load_config(cli.config.as_deref(), &cli.overrides)?;
        return run_export(config, group, use_colors);
    }

    match cli.command {
        Commands::Inspect { json } => {
            let config = load_config(cli.config.as_deref(), &cli.overrides)?;
            run_inspect(config, json)
        }
        Commands::CheckManual { path } => {
            let config = load_config(cli.config.as_deref(), &cli.overrides)?;
            run_check_manual(config, path.as_deref(), use_colors)
        }
        Commands::ValidateConfig { config_file } => run_validate_config(config_file.or(cli.config)),
        _ => Ok(0),
    }
}

/// Explicit config file, else the first default file in the working directory, else defaults
fn load_config(config_path: Option<&Path>, overrides: &Overrides) -> Result<ExportConfig> {
    let config = match config_path {
        Some(path) => ExportConfig::load_from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            match ExportConfig::discover(&cwd) {
                Some(path) => {
                    tracing::debug!("Using configuration {}", path.display());
                    ExportConfig::load_from_file(path)?
                }
                None => ExportConfig::default(),
            }
        }
    };

    apply_overrides(config, overrides)
}

fn apply_overrides(config: ExportConfig, overrides: &Overrides) -> Result<ExportConfig> {
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(input) = &overrides.input {
        builder = builder.input(input.clone());
    }
    if let Some(feature_class) = &overrides.feature_class {
        builder = builder.feature_class(feature_class.clone());
    }
    if let Some(output_dir) = &overrides.output_dir {
        builder = builder.output_dir(output_dir.clone());
    }

    Ok(builder.build()?)
}

fn run_export(config: ExportConfig, group: ArtifactGroup, use_colors: bool) -> Result<i32> {
    let exporter = SchemaExporter::new_with_config(config)?;
    let run = exporter.run(group)?;

    print_run_summary(&run, use_colors);
    Ok(0)
}

fn print_run_summary(run: &ExportRun, use_colors: bool) {
    let count = run.artifacts.len();
    println!(
        "{}",
        paint(
            &format!(
                "✅ Exported {} artifact{} for {}",
                count,
                if count == 1 { "" } else { "s" },
                run.schema.feature_class
            ),
            Tone::Success,
            use_colors
        )
    );

    for (record, path) in run.artifacts.iter().zip(run.paths()) {
        println!("  📄 {} ({} bytes)", path.display(), record.bytes);
    }

    let resolved = run.schema.resolved_fields().count();
    println!(
        "📊 {} fields, {} with resolved domains, {} workspace domains",
        run.schema.fields.len(),
        resolved,
        run.schema.domains.len()
    );

    let unresolved: Vec<&str> = run
        .schema
        .unresolved_fields()
        .map(|field| field.name.as_str())
        .collect();
    if !unresolved.is_empty() {
        println!(
            "{}",
            paint(
                &format!(
                    "⚠️  {} field{} reference missing domains: {}",
                    unresolved.len(),
                    if unresolved.len() == 1 { "" } else { "s" },
                    unresolved.join(", ")
                ),
                Tone::Warning,
                use_colors
            )
        );
    }

    if let Some(manifest) = &run.manifest {
        println!("🔒 Source sha256 {}", manifest.source.sha256);
    }
}

fn run_inspect(config: ExportConfig, json: bool) -> Result<i32> {
    let exporter = SchemaExporter::new_with_config(config)?;
    let summary = exporter.inspect()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("📋 Schema summary\n");
        print!("{}", summary.format_display());
    }

    Ok(0)
}

fn run_check_manual(config: ExportConfig, path: Option<&Path>, use_colors: bool) -> Result<i32> {
    let exporter = SchemaExporter::new_with_config(config)?;
    let manual_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| exporter.artifact_path(gdb_schema_export::ArtifactKind::Manual));

    println!("Checking manual: {}", manual_path.display());
    let check = exporter.check_manual(Some(&manual_path))?;

    println!(
        "📊 {} field sections, {} internal links",
        check.field_sections, check.internal_links
    );

    let problems = check.problems();
    if problems.is_empty() {
        println!("{}", paint("✅ Manual navigation is valid", Tone::Success, use_colors));
        return Ok(0);
    }

    println!(
        "{}",
        paint(
            &format!(
                "❌ Found {} problem{}:",
                problems.len(),
                if problems.len() == 1 { "" } else { "s" }
            ),
            Tone::Failure,
            use_colors
        )
    );
    for problem in &problems {
        println!("  - {}", problem);
    }

    Ok(1)
}

fn run_validate_config(config_path: Option<PathBuf>) -> Result<i32> {
    let config_path = config_path
        .or_else(|| std::env::current_dir().ok().and_then(|cwd| ExportConfig::discover(&cwd)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILES[0]));

    println!("Validating configuration: {}", config_path.display());

    match ExportConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("✅ Configuration is valid");

            println!("📊 Configuration summary:");
            println!("  Input: {}", config.input.display());
            println!("  Feature class: {}", config.feature_class);
            println!("  Output directory: {}", config.output_dir.display());
            println!(
                "  Manual: preview {} of domains over {} values",
                config.manual.preview_rows, config.manual.large_domain_threshold
            );
            println!("  Artifacts:");
            for (kind, name) in config.artifact_file_names() {
                println!("    {}: {}", kind, name);
            }

            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            Ok(1)
        }
    }
}

#[cfg(feature = "colors")]
fn configure_colors(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

#[cfg(not(feature = "colors"))]
fn configure_colors(_enabled: bool) {}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Failure,
}

fn paint(text: &str, tone: Tone, use_colors: bool) -> String {
    #[cfg(feature = "colors")]
    {
        if use_colors {
            return match tone {
                Tone::Success => text.green().bold().to_string(),
                Tone::Warning => text.yellow().to_string(),
                Tone::Failure => text.red().bold().to_string(),
            };
        }
    }

    let _ = (tone, use_colors);
    text.to_string()
}

fn init_logging(verbose: bool) {
    let directives = log_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `--verbose` wins, then `RUST_LOG`, then warnings only
fn log_directives(verbose: bool, env: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}
