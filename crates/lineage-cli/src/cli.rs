//! Command-line interface for the lineage utility
//!
//! Reads a family tree snapshot (JSON) and prints its layout, generations,
//! validation issues or name matches.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::load_config;
use lineage::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use lineage::tree::{find_matches, FamilyTreeLayout};
use lineage::{LayoutAlgorithm, LayoutConfig, TreeDatabase};

/// Lineage - Lay out family trees as generation-ordered diagrams
#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "A Rust utility to lay out family tree snapshots as positioned nodes and edges")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Layout settings shared by the commands that run the engine
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct LayoutArgs {
    /// TOML file with layout settings (default: ./lineage.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Horizontal distance between people in a row
    #[arg(long)]
    pub h_spacing: Option<f64>,

    /// Vertical distance between generation rows
    #[arg(long)]
    pub v_spacing: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a snapshot and print nodes and edges as JSON
    Layout {
        /// Input snapshot file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the layout JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the generation of every person
    Generations {
        /// Input snapshot file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check a snapshot for duplicate ids and dangling references
    Validate {
        /// Input snapshot file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print people whose name contains a query
    Search {
        /// Input snapshot file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Case-insensitive name fragment
        #[arg(short, long)]
        query: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Main CLI application
pub struct LineageApp {
    working_dir: PathBuf,
}

impl LineageApp {
    /// Create a new application instance looking for config in the current directory
    pub fn new() -> Self {
        Self::with_working_dir(PathBuf::from("."))
    }

    /// Create a new application instance looking for config in `working_dir`
    pub fn with_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Lineage v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                pretty,
                layout,
            } => self.layout_command(input, output, pretty, &layout, cli.verbose),
            Commands::Generations {
                input,
                json,
                layout,
            } => self.generations_command(input, json, &layout, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Search {
                input,
                query,
                layout,
            } => self.search_command(input, &query, &layout, cli.verbose),
        }
    }

    /// Resolve the layout config: file first, then flag overrides
    pub fn resolve_config(&self, args: &LayoutArgs) -> Result<LayoutConfig> {
        let mut config = load_config(args.config.as_deref(), &self.working_dir)?;
        if let Some(spacing) = args.h_spacing {
            config = config.with_horizontal_spacing(spacing);
        }
        if let Some(spacing) = args.v_spacing {
            config = config.with_vertical_spacing(spacing);
        }
        config.validate()?;
        Ok(config)
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        pretty: bool,
        args: &LayoutArgs,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let config = self.resolve_config(args)?;
        let rendered = Self::render_layout(&content, config, pretty)?;

        if verbose {
            eprintln!("Successfully laid out family tree");
        }

        self.write_output(output, &rendered)
    }

    /// Parse a snapshot and serialize its layout
    pub fn render_layout(content: &str, config: LayoutConfig, pretty: bool) -> Result<String> {
        let database = TreeDatabase::from_json(content)?;
        let result = FamilyTreeLayout::with_config(config).layout(&database);

        Ok(if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        })
    }

    /// Handle the generations command
    fn generations_command(
        &self,
        input: Option<PathBuf>,
        json: bool,
        args: &LayoutArgs,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let config = self.resolve_config(args)?;
        let report = Self::render_generations(&content, config, json)?;
        self.write_output(None, &report)
    }

    /// One line per person (`id<TAB>generation<TAB>name`), or the map as JSON
    pub fn render_generations(content: &str, config: LayoutConfig, json: bool) -> Result<String> {
        let database = TreeDatabase::from_json(content)?;
        let generations = FamilyTreeLayout::with_config(config)
            .generations(database.people(), database.relationships());

        if json {
            return Ok(serde_json::to_string_pretty(&generations)?);
        }

        let mut lines: Vec<String> = generations
            .iter()
            .map(|(id, generation)| {
                let name = database
                    .person(id)
                    .map(|p| p.full_name.as_str())
                    .unwrap_or_default();
                format!("{}\t{}\t{}", id, generation, name)
            })
            .collect();

        if generations.outcome().is_degraded() {
            lines.push(format!("# best effort: {:?}", generations.outcome()));
        }
        Ok(lines.join("\n"))
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = TreeDatabase::from_json(&content)?;
        let issues = database.issues();

        if issues.is_empty() {
            println!(
                "✓ Valid snapshot: {} people, {} relationships",
                database.person_count(),
                database.relationship_count()
            );
            return Ok(());
        }

        for issue in &issues {
            println!("✗ {}", issue);
        }
        Err(anyhow!("{} issue(s) found", issues.len()))
    }

    /// Handle the search command
    fn search_command(
        &self,
        input: Option<PathBuf>,
        query: &str,
        args: &LayoutArgs,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        let config = self.resolve_config(args)?;
        let report = Self::render_search(&content, query, config)?;

        if verbose {
            eprintln!("{} match(es) for '{}'", report.lines().count(), query);
        }

        self.write_output(None, &report)
    }

    /// Matching people in layout order, one `id<TAB>name` line each
    pub fn render_search(content: &str, query: &str, config: LayoutConfig) -> Result<String> {
        let database = TreeDatabase::from_json(content)?;
        let result = FamilyTreeLayout::with_config(config).layout(&database);

        Ok(find_matches(&result.nodes, query)
            .iter()
            .map(|node| format!("{}\t{}", node.id, node.data.full_name))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl Default for LineageApp {
    fn default() -> Self {
        Self::new()
    }
}
