//! vdoc CLI - Versioned documentation renderer.
//!
//! Provides commands for:
//! - `render`: Print a rendered page or version index
//! - `exists`: Check whether a page exists
//! - `versions`: List published versions

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vdoc_config::{CacheBackend, CliSettings, Config};

use commands::{ExistsArgs, RenderArgs};
use error::CliError;
use output::Output;

/// vdoc - Versioned documentation renderer.
#[derive(Parser)]
#[command(name = "vdoc", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Path to configuration file (default: auto-discover vdoc.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Documentation root directory (overrides config).
    #[arg(short, long, global = true, env = "VDOC_ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// Page cache backend: memory, file or none (overrides config).
    #[arg(long, global = true)]
    cache: Option<CacheBackend>,

    /// Page cache time-to-live in seconds (overrides config).
    #[arg(long, global = true)]
    ttl: Option<u64>,

    /// Enable verbose output (cache and render logs).
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn load_config(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root_dir: self.root_dir,
            cache_backend: self.cache,
            ttl_secs: self.ttl,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered HTML of a page, or of the version index.
    Render(RenderArgs),
    /// Check whether a page exists; exits with status 1 if it does not.
    Exists(ExistsArgs),
    /// List published versions as `id<TAB>label`.
    Versions,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli, &output) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            output.error(err);
            std::process::exit(1);
        }
    }
}

/// Run a command and return the process exit code.
fn run(cli: Cli, output: &Output) -> Result<i32, CliError> {
    let config = cli.global.load_config()?;
    let docs = commands::open_docs(&config)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Render(args) => args.execute(&docs, output, &mut stdout),
        Commands::Exists(args) => args.execute(&docs, &mut stdout),
        Commands::Versions => commands::list_versions(&docs, &mut stdout),
    }
}
