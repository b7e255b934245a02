//! watchcalc: the watch-face calculator in your terminal
//!
//! ## Usage
//!
//! ```bash
//! watchcalc press 12+7=             # Show the display after the keys
//! watchcalc press --each 9 / 3 =    # Show it after every key
//! watchcalc --format json press 4x5 # Frame as JSON
//! watchcalc keypad                  # Show the keypad
//! watchcalc interactive             # Read key lines from stdin
//! ```

use clap::Parser;
use std::process::ExitCode;
use watchcalc::config::DisplayConfig;
use watchcalc_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    logging::init_logging(verbosity, cli.log_format);

    let config = build_config(&cli, verbosity)?;
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Press(args) => {
            handlers::run_press(&config, &args.key_sequence(), args.each, &mut out)
        }
        Commands::Keypad => handlers::run_keypad(&config, &mut out),
        Commands::Interactive => {
            handlers::run_interactive(&config, std::io::stdin().lock(), &mut out)
        }
    }
}

fn build_config(cli: &Cli, verbosity: Verbosity) -> CliResult<CliConfig> {
    let mut display = match &cli.config {
        Some(path) => DisplayConfig::from_path(path).map_err(|e| CliError::config(e.to_string()))?,
        None => DisplayConfig::default(),
    };
    if let Some(width) = cli.width {
        display =
            DisplayConfig::with_width(width).map_err(|e| CliError::config(e.to_string()))?;
    }

    let color: ColorChoice = cli.color.into();
    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(cli.format)
        .with_display(display))
}
