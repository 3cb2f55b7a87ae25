//! Lucky Wheel CLI - opens the wheel window and manages its saved options.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::{config as config_cmd, gui, options, spin};
use config::{Config, DATA_DIR_ENV};

/// Lucky Wheel - spin a wheel of eight labels.
///
/// Run `lucky-wheel` to open the window. Double-click the wheel to edit the
/// labels, hold it to reset them.
#[derive(Parser, Debug)]
#[command(
    name = "lucky-wheel",
    author,
    version,
    about = "Lucky Wheel: spin a wheel of eight labels",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding options.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the wheel window (default command).
    Gui,

    /// Show or change the eight labels.
    #[command(subcommand)]
    Options(OptionsCommands),

    /// Spin once without a window and print the result.
    Spin {
        /// Land on this segment (0-7) instead of a random one.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..8))]
        index: Option<u8>,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Option label commands.
#[derive(Subcommand, Debug)]
enum OptionsCommands {
    /// Print the current labels.
    Show,

    /// Replace all labels.
    Set {
        /// Exactly eight labels separated by commas.
        labels: String,
    },

    /// Restore the default labels.
    Reset,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration; the flag wins over file and environment
    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => gui::execute(&config)?,

        Commands::Options(options_cmd) => match options_cmd {
            OptionsCommands::Show => options::show(&config)?,
            OptionsCommands::Set { labels } => options::set(&config, &labels)?,
            OptionsCommands::Reset => options::reset(&config)?,
        },

        Commands::Spin { index } => spin::execute(&config, index.map(usize::from))?,

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => config_cmd::show(&config)?,
            ConfigCommands::Reset => config_cmd::reset()?,
            ConfigCommands::Path => config_cmd::path()?,
        },
    }

    Ok(())
}
