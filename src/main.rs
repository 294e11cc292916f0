// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the terminal UI and hand it
//   to the menu loop.
// - Returns `anyhow::Result` so setup errors are printed with context.

use anyhow::Context;
use clap::Parser;
use shelf_helpers::{config, logger, menu::main_menu, ui::TerminalUi};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf-helpers", about = "Try the shelf helper utilities interactively")]
struct Cli {
    /// Show debug messages
    #[arg(short, long)]
    verbose: bool,

    /// Directory for the log file (defaults to the user cache directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Only log to the console
    #[arg(long)]
    no_log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.unwrap_or_else(config::log_dir_from_env);

    let mut log_config = logger::LoggerConfig::new("shelf-helpers").verbose(cli.verbose);
    if !cli.no_log_file {
        log_config = log_config.directory(&log_dir);
    }
    let log = logger::init(&log_config).context("Failed to set up logging")?;

    // read after logging is up so a missing $EDITOR gets reported
    let mut config = config::UiConfig::from_env();
    config.log_dir = log_dir;

    // Blocks until the user picks "Exit".
    main_menu(&TerminalUi::new(config))?;

    log.close();
    Ok(())
}
