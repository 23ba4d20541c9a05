//! Command-line interface for the pumlgen utility
//!
//! Reads a JSON declaration feed and writes PlantUML class diagrams.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pumlgen::core::logging::init_logging;
use pumlgen::feed::{DiagramBuilder, Feed};
use pumlgen::uml::{Diagram, Visibility};
use pumlgen::{package_diagram_path, RenderConfig, TypeDisplay};

/// pumlgen - Render PlantUML class diagrams from a type declaration feed
#[derive(Parser)]
#[command(name = "pumlgen")]
#[command(about = "A Rust utility to render PlantUML class diagrams from type declarations")]
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

#[derive(Subcommand)]
pub enum Commands {
    /// Render every package of a feed into one class diagram
    Render {
        /// Input feed (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write one package.puml per package under a directory
    Packages {
        /// Input feed (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory that receives <package path>/package.puml files
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Check that a feed parses and builds
    Validate {
        /// Input feed (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Options shared by the rendering commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RenderArgs {
    /// How member and parameter types are shown
    #[arg(long, value_enum, default_value_t = TypeDisplayChoice::Simple)]
    pub type_display: TypeDisplayChoice,

    /// Label each type with its package on a second line
    #[arg(long)]
    pub add_package_to_name: bool,

    /// Base URL that documentation links are resolved against
    #[arg(long)]
    pub link_base: Option<String>,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    pub indent: usize,

    /// Extra line emitted after @startuml (repeatable)
    #[arg(long = "directive")]
    pub directives: Vec<String>,

    /// Field visibilities to include (repeatable; default public and protected)
    #[arg(long = "field-visibility", value_enum)]
    pub field_visibilities: Vec<VisibilityChoice>,

    /// Method visibilities to include (repeatable; default public and protected)
    #[arg(long = "method-visibility", value_enum)]
    pub method_visibilities: Vec<VisibilityChoice>,

    /// Keep empty member compartments visible
    #[arg(long)]
    pub show_empty_members: bool,
}

impl RenderArgs {
    /// Build the render configuration these options describe
    pub fn to_config(&self) -> RenderConfig {
        let mut config = RenderConfig::new()
            .with_type_display(self.type_display.into())
            .with_add_package_to_name(self.add_package_to_name)
            .with_indentation(self.indent)
            .with_hide_empty_members(!self.show_empty_members);
        if let Some(base) = &self.link_base {
            config = config.with_link_base(base.as_str());
        }
        for directive in &self.directives {
            config = config.with_directive(directive.as_str());
        }
        if !self.field_visibilities.is_empty() {
            config = config.with_field_visibilities(
                self.field_visibilities.iter().map(|&v| v.into()).collect(),
            );
        }
        if !self.method_visibilities.is_empty() {
            config = config.with_method_visibilities(
                self.method_visibilities.iter().map(|&v| v.into()).collect(),
            );
        }
        config
    }
}

/// Type display modes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum TypeDisplayChoice {
    /// Hide member types
    None,
    /// Simple names: List<String>
    #[default]
    Simple,
    /// Qualified names: java.util.List<java.lang.String>
    Qualified,
    /// Simple name with qualified generics: List<java.lang.String>
    QualifiedGenerics,
}

impl From<TypeDisplayChoice> for TypeDisplay {
    fn from(value: TypeDisplayChoice) -> Self {
        match value {
            TypeDisplayChoice::None => TypeDisplay::None,
            TypeDisplayChoice::Simple => TypeDisplay::Simple,
            TypeDisplayChoice::Qualified => TypeDisplay::Qualified,
            TypeDisplayChoice::QualifiedGenerics => TypeDisplay::QualifiedGenerics,
        }
    }
}

/// Member visibilities
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum VisibilityChoice {
    Public,
    Protected,
    Package,
    Private,
}

impl From<VisibilityChoice> for Visibility {
    fn from(value: VisibilityChoice) -> Self {
        match value {
            VisibilityChoice::Public => Visibility::Public,
            VisibilityChoice::Protected => Visibility::Protected,
            VisibilityChoice::Package => Visibility::Package,
            VisibilityChoice::Private => Visibility::Private,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct PumlgenApp;

impl PumlgenApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("PUMLGEN_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("PUMLGEN_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("pumlgen v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                render,
            } => self.render_command(input, output, &render, cli.verbose),
            Commands::Packages {
                input,
                output_dir,
                render,
            } => self
                .packages_command(input, &output_dir, &render, cli.verbose)
                .map(|_| ()),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        render: &RenderArgs,
        verbose: bool,
    ) -> Result<()> {
        let feed = self.read_feed(input, verbose)?;
        let diagram = DiagramBuilder::new(&feed, render.to_config())
            .class_diagram()
            .context("Failed to build class diagram")?;

        if verbose {
            eprintln!(
                "Rendered {} types and {} relationships",
                diagram.type_count(),
                diagram.relationship_count()
            );
        }

        self.write_output(output, &diagram.render())
    }

    /// Handle the packages command, returning the files written
    fn packages_command(
        &self,
        input: Option<PathBuf>,
        output_dir: &Path,
        render: &RenderArgs,
        verbose: bool,
    ) -> Result<Vec<PathBuf>> {
        let feed = self.read_feed(input, verbose)?;
        let diagrams = DiagramBuilder::new(&feed, render.to_config())
            .package_diagrams()
            .context("Failed to build package diagrams")?;

        let mut written = Vec::with_capacity(diagrams.len());
        for (name, diagram) in diagrams {
            let path = output_dir.join(package_diagram_path(&name)?);
            write_diagram(&path, &diagram)?;
            debug!(package = name.as_str(), path = %path.display(), "Wrote package diagram");
            if verbose {
                eprintln!("Wrote {}", path.display());
            }
            written.push(path);
        }
        info!(files = written.len(), output_dir = %output_dir.display(), "Wrote package diagrams");
        Ok(written)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let feed = self.read_feed(input, verbose)?;

        match DiagramBuilder::new(&feed, RenderConfig::default()).class_diagram() {
            Ok(diagram) => {
                println!(
                    "✓ Valid feed: {} packages, {} types, {} relationships",
                    feed.packages.len(),
                    diagram.type_count(),
                    diagram.relationship_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid feed: {}", e);
                Err(e.into())
            }
        }
    }

    fn read_feed(&self, input: Option<PathBuf>, verbose: bool) -> Result<Feed> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        Feed::from_json(&content).context("Failed to parse declaration feed")
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
                print!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

fn write_diagram(path: &Path, diagram: &Diagram) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create directory '{}': {}", parent.display(), e))?;
    }
    fs::write(path, diagram.render())
        .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))
}
