// sheetdash - terminal dashboard for benchmark results kept in spreadsheets

mod dashboard;
mod exit_codes;
mod render;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sheetdash_config::dashboard::MAX_INTERVAL_SECS;
use sheetdash_config::{ConfigError, DashboardConfig};
use sheetdash_source::SourceError;

use dashboard::Dashboard;
use exit_codes::{
    source_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "sheetdash")]
#[command(about = "Benchmark dashboard fed by spreadsheets")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log debug output (fetch URLs, poll summaries) to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll sources on an interval and rotate through their tabs
    #[command(after_help = "\
Examples:
  sheetdash run -f results.xlsx
  sheetdash run -f nightly.csv weekly.xlsx -s 5 -n 2
  sheetdash run -r 1AbCdEf -u 600")]
    Run {
        #[command(flatten)]
        sources: SourceArgs,

        /// Exit after this many frames
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        frames: Option<u64>,
    },

    /// Poll sources once and print what each tab would show
    #[command(after_help = "\
Examples:
  sheetdash show -f results.xlsx
  sheetdash show -r 1AbCdEf --json | jq '.sources[].tabs[].name'")]
    Show {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Configuration file helpers
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the default config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Where to write (default: the default config path)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Source and interval options shared by `run` and `show`. Flags override
/// the config file.
#[derive(Args)]
struct SourceArgs {
    /// Local spreadsheet files
    #[arg(long = "file", short = 'f', num_args = 1..)]
    files: Vec<PathBuf>,

    /// Remote directory document id
    #[arg(long, short = 'r')]
    remote: Option<String>,

    /// Seconds between polls
    #[arg(long = "update-interval", short = 'u', value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_SECS))]
    update_interval: Option<u64>,

    /// Seconds between tab switches
    #[arg(long = "tabswitch-interval", short = 's', value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_SECS))]
    tabswitch_interval: Option<u64>,

    /// Source blocks per row
    #[arg(long = "plots-per-line", short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
    plots_per_line: Option<u64>,

    /// Config file (default: the per-user config path, if present)
    #[arg(long, env = "SHEETDASH_CONFIG")]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn resolve(self) -> Result<DashboardConfig, CliError> {
        let mut config = DashboardConfig::load(self.config.as_deref()).map_err(CliError::config)?;

        if !self.files.is_empty() {
            config.files = self.files;
        }
        if self.remote.is_some() {
            config.remote = self.remote;
        }
        if let Some(secs) = self.update_interval {
            config.update_interval_secs = secs;
        }
        if let Some(secs) = self.tabswitch_interval {
            config.tab_switch_interval_secs = secs;
        }
        if let Some(n) = self.plots_per_line {
            config.plots_per_line = n as usize;
        }
        config.validate().map_err(CliError::config)?;

        if !config.has_sources() {
            return Err(CliError::usage("no sources configured").with_hint(format!(
                "pass -f FILE or -r ID, or list them in {}",
                DashboardConfig::config_path().display()
            )));
        }
        Ok(config)
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT_HASH"),
        ")",
        "\nengine:  sheetdash-engine ",
        env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { sources, frames } => cmd_run(sources, frames),
        Commands::Show { sources, json } => cmd_show(sources, json),
        Commands::Config(ConfigCommands::Path) => cmd_config_path(),
        Commands::Config(ConfigCommands::Init { path, force }) => cmd_config_init(path, force),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn config(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
    }

    /// Create error from a failed poll with the matching exit code.
    pub fn source(interface: &str, err: &SourceError) -> Self {
        let hint = match err {
            SourceError::Unavailable(_) => {
                Some("check the path, or that the document is shared for export".to_string())
            }
            SourceError::InvalidSetting(_) => {
                Some("fix the s: directive in the named worksheet".to_string())
            }
            SourceError::Malformed(_) => None,
        };
        Self {
            code: source_exit_code(err),
            message: format!("{}: {}", interface, err),
            hint,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(sources: SourceArgs, frames: Option<u64>) -> Result<(), CliError> {
    let config = sources.resolve()?;
    let mut dashboard = Dashboard::from_config(&config)?;

    // Initial poll; a source that fails now stays empty until it recovers.
    for failure in dashboard.poll_all() {
        eprintln!("warning: {}: {}", failure.interface, failure.error);
    }

    let options = run::RunOptions {
        update_every: Duration::from_secs(config.update_interval_secs),
        render_every: Duration::from_secs(config.tab_switch_interval_secs),
        plots_per_line: config.plots_per_line,
        max_frames: frames,
    };
    run::run(&mut dashboard, &options)
}

// ============================================================================
// show
// ============================================================================

fn cmd_show(sources: SourceArgs, json: bool) -> Result<(), CliError> {
    let config = sources.resolve()?;
    let mut dashboard = Dashboard::from_config(&config)?;

    if let Some(failure) = dashboard.poll_all().into_iter().next() {
        return Err(CliError::source(&failure.interface, &failure.error));
    }

    if json {
        let text = render::json_report(&dashboard)
            .and_then(|report| serde_json::to_string_pretty(&report))
            .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot encode report: {}", e)))?;
        println!("{}", text);
    } else {
        print!("{}", render::text_frame(&dashboard, 0, config.plots_per_line));
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_path() -> Result<(), CliError> {
    println!("{}", DashboardConfig::config_path().display());
    Ok(())
}

fn cmd_config_init(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(DashboardConfig::config_path);
    if path.exists() && !force {
        return Err(CliError::usage(format!("{} already exists", path.display()))
            .with_hint("use --force to overwrite"));
    }
    DashboardConfig::write_default(&path).map_err(CliError::config)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
