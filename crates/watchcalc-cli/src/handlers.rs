//! Subcommand handlers
//!
//! Handlers write to any `Write` so the same code serves stdout and tests.

use std::io::{BufRead, Write};

use tracing::info;
use watchcalc::core::CalcError;
use watchcalc::driver::{CalculatorDriver, WatchDriver};
use watchcalc::keypad::{Keypad, KeypadAction};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Renderer;

/// Words that end an interactive session
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

fn renderer(config: &CliConfig) -> Renderer {
    Renderer::new(config.format, config.color.should_color())
}

/// Presses `keys` and writes the final frame, or one frame per key with `each`
pub fn run_press<W: Write>(
    config: &CliConfig,
    keys: &str,
    each: bool,
    out: &mut W,
) -> CliResult<()> {
    let renderer = renderer(config);
    let mut driver = WatchDriver::with_config(config.display);
    let actions = Keypad::parse_keys(keys)?;
    info!(keys = actions.len(), width = config.display.width, "pressing keys");

    for action in actions {
        press_reporting(&mut driver, action, &renderer, config);
        if each {
            writeln!(out, "{}", renderer.render_frame(&driver.frame())?)?;
        }
    }
    if !each {
        writeln!(out, "{}", renderer.render_frame(&driver.frame())?)?;
    }
    Ok(())
}

/// Writes the keypad layout
pub fn run_keypad<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    let keypad = Keypad::new();
    writeln!(out, "{}", renderer(config).render_keypad(&keypad)?)?;
    Ok(())
}

/// Reads key lines from `input` until EOF or a quit word
///
/// Unknown keys reject the whole line with a warning; the session goes on.
pub fn run_interactive<R: BufRead, W: Write>(
    config: &CliConfig,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let renderer = renderer(config);
    let mut driver = WatchDriver::with_config(config.display);
    writeln!(out, "{}", renderer.render_frame(&driver.frame())?)?;

    for line in input.lines() {
        let line = line?;
        let keys = line.trim();
        if keys.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&keys) {
            break;
        }

        match Keypad::parse_keys(keys) {
            Ok(actions) => {
                for action in actions {
                    press_reporting(&mut driver, action, &renderer, config);
                }
            }
            Err(e) => {
                if !config.verbosity.is_quiet() {
                    renderer.warning(&format!("{e}, line ignored"));
                }
                continue;
            }
        }
        writeln!(out, "{}", renderer.render_frame(&driver.frame())?)?;
    }
    Ok(())
}

fn press_reporting(
    driver: &mut WatchDriver,
    action: KeypadAction,
    renderer: &Renderer,
    config: &CliConfig,
) {
    let Err(e) = driver.press(action) else {
        return;
    };
    // Overflow already shows on the display; division by zero deserves a word
    let notable = config.verbosity.is_verbose() || matches!(e, CalcError::DivisionByZero);
    if notable && !config.verbosity.is_quiet() {
        renderer.warning(&e.to_string());
    }
}
