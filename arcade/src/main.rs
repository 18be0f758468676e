//! Agent Arcade - command line interface
//!
//! Installs and inspects the editor hooks, drives the agent counter by hand
//! and watches it to decide when the arcade panel should be visible.

#![forbid(unsafe_code)]

mod commands;

use anyhow::Result;
use arcade_common::config::{self, EnvParser, Settings};
use arcade_common::{LogConfig, LoggingGuards, Scope, StateStore, init_logging};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};

use commands::AppContext;

#[derive(Parser)]
#[command(name = "arcade")]
#[command(author, version, about = "Agent Arcade - hook management and agent status")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "ARCADE_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Which hooks file to manage (overrides the settings file)
    #[arg(long, global = true, value_enum)]
    scope: Option<ScopeArg>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Global,
    Workspace,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Global => Scope::Global,
            ScopeArg::Workspace => Scope::Workspace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Control arcade panel visibility
    Display {
        #[command(subcommand)]
        action: DisplayAction,
    },

    /// Count one more running agent
    Start,

    /// Count one fewer running agent
    Stop,

    /// Show agent count, hook state and panel visibility
    Status,

    /// Reset the persisted high score to zero
    ResetHighScore,

    /// Manage hook registration in the editor's hooks file
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },

    /// Show the panel automatically while agents run
    AutoShow {
        #[arg(value_enum, default_value = "toggle")]
        mode: AutoShowMode,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Install hooks as the editor does on startup (failures are warnings)
    Activate,

    /// Remove hook entries from the global and workspace hooks files
    Deactivate,

    /// Watch the agent counter and report panel transitions
    Watch,
}

#[derive(Subcommand, Clone, Copy)]
pub enum DisplayAction {
    /// Pin the panel to the opposite of its current visibility
    Toggle,
    /// Return to automatic visibility
    Auto,
    /// Pin the panel open
    Show,
}

#[derive(Subcommand, Clone, Copy)]
pub enum HooksAction {
    /// Write hook scripts and reconcile the hooks file
    Install,
    /// Report registration state without writing anything
    Check,
    /// Remove this tool's entries from the selected hooks file
    Uninstall,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AutoShowMode {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the settings file location
    Path,
    /// Print effective settings and where each value came from
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::helpers::report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut env = EnvParser::new();
    let config_path = config::config_path(&mut env)?;
    let data_dir = config::data_dir(&mut env)?;
    let loaded = Settings::load(&config_path, &mut env)?;

    let guards = setup_logging(&cli, &loaded.settings, &data_dir);
    for warning in &loaded.warnings {
        warn!("Ignoring environment override: {}", warning);
    }

    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let scope = cli.scope.map(Scope::from).unwrap_or(loaded.settings.scope);
    debug!(
        "workspace={} scope={} config={}",
        workspace.display(),
        scope,
        config_path.display()
    );

    let ctx = AppContext {
        workspace,
        scope,
        state: StateStore::new(data_dir.join(config::STATE_FILE_NAME)),
        log_file: guards
            .log_file()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_log_file(&data_dir)),
        loaded,
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Display { action } => commands::display::run(&ctx, action),
        Commands::Start => commands::status::adjust(&ctx, 1),
        Commands::Stop => commands::status::adjust(&ctx, -1),
        Commands::Status => commands::status::show(&ctx),
        Commands::ResetHighScore => commands::display::reset_high_score(&ctx),
        Commands::Hooks { action } => commands::hooks::run(&ctx, action).await,
        Commands::AutoShow { mode } => commands::config::auto_show(&ctx, mode),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Activate => commands::hooks::activate(&ctx).await,
        Commands::Deactivate => commands::hooks::deactivate(&ctx),
        Commands::Watch => commands::watch::run(&ctx).await,
    };
    drop(guards);
    result
}

fn default_log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("logs").join("arcade.log")
}

fn setup_logging(cli: &Cli, settings: &Settings, data_dir: &Path) -> LoggingGuards {
    let default_level = settings.log_level.as_deref().unwrap_or("warn");
    let mut config = LogConfig::from_env(default_level).with_file(default_log_file(data_dir));
    if cli.verbose {
        config = config.with_level("debug");
    }

    match init_logging(&config) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("{}", commands::helpers::logging_disabled_warning(&e));
            LoggingGuards::default()
        }
    }
}
