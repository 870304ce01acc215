//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use docbinder_core::pipeline::{
    BundleReport, BundleRequest, ProgressReporter, bundle_html, bundle_markdown, bundle_pdf,
};
use docbinder_core::render::Converters;
use docbinder_shared::{AppConfig, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docbinder — bind a documentation tree into a single document.
#[derive(Parser)]
#[command(
    name = "docbinder",
    version,
    about = "Concatenate a Markdown documentation tree into one numbered Markdown, HTML or PDF document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.docbinder/docbinder.toml).
    #[arg(long, env = "DOCBINDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write the assembled tree to a single Markdown file.
    Markdown {
        /// Root directory of the documentation tree.
        source: PathBuf,

        /// Markdown file to create or overwrite.
        output: PathBuf,
    },

    /// Render the assembled tree to a standalone HTML file via pandoc.
    Html {
        /// Root directory of the documentation tree.
        source: PathBuf,

        /// HTML file to create (must end with .html).
        output: PathBuf,
    },

    /// Render the assembled tree to PDF via pandoc and wkhtmltopdf.
    Pdf {
        /// Root directory of the documentation tree.
        source: PathBuf,

        /// PDF file to create (must end with .pdf).
        output: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docbinder=info",
        1 => "docbinder=debug",
        _ => "docbinder=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Markdown { source, output } => cmd_markdown(&source, &output),
        Command::Html { source, output } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_html(&source, &output, &config)
        }
        Command::Pdf { source, output } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_pdf(&source, &output, &config)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

/// Load the explicit config file, or the default one (falling back to defaults).
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)
            .wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_markdown(source: &Path, output: &Path) -> Result<()> {
    info!(source = %source.display(), output = %output.display(), "bundling Markdown");

    let reporter = CliProgress::new();
    let result = bundle_markdown(&BundleRequest::new(source, output), &reporter);
    reporter.clear();

    print_summary(&result?);
    Ok(())
}

fn cmd_html(source: &Path, output: &Path, config: &AppConfig) -> Result<()> {
    info!(source = %source.display(), output = %output.display(), "bundling HTML");

    let converters = Converters::from_config(config);
    let request = request_from_config(source, output, config);

    let reporter = CliProgress::new();
    let result = bundle_html(&request, &converters, &reporter);
    reporter.clear();

    print_summary(&result?);
    Ok(())
}

fn cmd_pdf(source: &Path, output: &Path, config: &AppConfig) -> Result<()> {
    info!(source = %source.display(), output = %output.display(), "bundling PDF");

    let converters = Converters::from_config(config);
    let request = request_from_config(source, output, config);

    let reporter = CliProgress::new();
    let result = bundle_pdf(&request, &converters, &reporter);
    reporter.clear();

    print_summary(&result?);
    Ok(())
}

fn request_from_config(source: &Path, output: &Path, config: &AppConfig) -> BundleRequest {
    BundleRequest {
        scratch_parent: config.scratch.dir.clone(),
        ..BundleRequest::new(source, output)
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn print_summary(report: &BundleReport) {
    println!();
    println!("  Bundle written!");
    println!("  Output:    {}", report.output.display());
    println!("  Sections:  {}", report.sections);
    println!("  Documents: {}", report.documents);
    if report.empty_sections > 0 {
        println!("  Empty:     {}", report.empty_sections);
    }
    if report.fragments > 0 {
        println!("  Fragments: {}", report.fragments);
    }
    println!("  Time:      {:.1}s", report.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _report: &BundleReport) {
        self.spinner.finish_and_clear();
    }
}
