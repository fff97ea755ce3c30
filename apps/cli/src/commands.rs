//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docsplice_core::pipeline::{ProgressReporter, SamplesReport, build_api, build_papers, build_samples};
use docsplice_core::process::SystemRunner;
use docsplice_shared::{
    ApiVersion, AppConfig, BuildConfig, init_config, load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docsplice — build helper for the sample-project documentation site.
#[derive(Parser)]
#[command(
    name = "docsplice",
    version,
    about = "Splice code samples into docs, convert papers, and publish API references.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (--verbose, --verbose --verbose).
    #[arg(long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root that relative paths resolve against (defaults to the
    /// current directory).
    #[arg(long, env = "DOCSPLICE_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/docsplice.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Extract code samples and rebuild the docs tree.
    Samples,

    /// Convert LaTeX papers to HTML.
    Papers,

    /// Generate API reference docs and copy them into the site.
    Api {
        /// Release version, e.g. v1.0.0 (dots become dashes in the URL).
        #[arg(short = 'v', long = "version")]
        version: String,
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
    /// Write a default docsplice.toml into the project root.
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
        0 => "docsplice=info",
        1 => "docsplice=debug",
        _ => "docsplice=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

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
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()
            .map_err(|e| eyre!("cannot determine working directory: {e}"))?,
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Samples => cmd_samples(&root, config_path),
        Command::Papers => cmd_papers(&root, config_path),
        Command::Api { version } => cmd_api(&root, config_path, &version),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&root, config_path),
        },
    }
}

/// Load the config file named on the command line, or the project default.
fn load(root: &Path, config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

fn cmd_samples(root: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = BuildConfig::resolve(&load(root, config_path)?, root, None);

    info!(
        samples = %config.sample_source_root.display(),
        docs = %config.doc_source_root.display(),
        "building docs"
    );

    let reporter = CliProgress::new();
    let report = build_samples(&config, &reporter)?;

    println!();
    println!("  Docs rebuilt.");
    println!("  Samples:    {}", report.sample_count);
    println!("  Documents:  {}", report.assembly.documents);
    println!("  Assets:     {}", report.assembly.assets);
    println!("  Directives: {}", report.assembly.directives);
    println!("  Output:     {}", report.assembly.output_root.display());
    println!("  Time:       {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_papers(root: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = BuildConfig::resolve(&load(root, config_path)?, root, None);

    info!(src = %config.paper_source_root.display(), "converting papers");

    let written = build_papers(&config, &SystemRunner)?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("  Converted {} paper(s).", written.len());

    Ok(())
}

fn cmd_api(root: &Path, config_path: Option<&Path>, version: &str) -> Result<()> {
    let version = ApiVersion::parse(version)?;
    let config = BuildConfig::resolve(&load(root, config_path)?, root, Some(version));

    info!(src = %config.api_source_root.display(), "publishing API docs");

    let written = build_api(&config, &SystemRunner)?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("  Published {} tree(s).", written.len());

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load(root, config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
    written: std::cell::Cell<usize>,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self {
            spinner,
            written: std::cell::Cell::new(0),
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, path: &Path) {
        let n = self.written.get() + 1;
        self.written.set(n);
        self.spinner.set_message(format!("Writing [{n}] {}", path.display()));
    }

    fn done(&self, _report: &SamplesReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Clear the spinner if the pipeline bailed out early
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
