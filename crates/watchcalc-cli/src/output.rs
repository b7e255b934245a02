//! Frame and keypad rendering for the terminal

use console::{style, Term};
use serde::{Deserialize, Serialize};
use watchcalc::display::DisplayFrame;
use watchcalc::keypad::{Keypad, KeypadAction, KeypadButtonDef};

use crate::error::CliResult;

/// Output format for display frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Operator and digit row as text
    #[default]
    Text,
    /// Frame as one JSON object per line
    Json,
    /// Image asset names in draw order
    Assets,
}

/// Renders frames and the keypad in the chosen format
#[derive(Debug)]
pub struct Renderer {
    format: OutputFormat,
    use_color: bool,
    term: Term,
}

impl Renderer {
    /// Create a renderer writing warnings to stderr
    #[must_use]
    pub fn new(format: OutputFormat, use_color: bool) -> Self {
        Self {
            format,
            use_color,
            term: Term::stderr(),
        }
    }

    /// Renders one display frame
    pub fn render_frame(&self, frame: &DisplayFrame) -> CliResult<String> {
        match self.format {
            OutputFormat::Text => Ok(self.frame_text(frame)),
            OutputFormat::Json => Ok(serde_json::to_string(frame)?),
            OutputFormat::Assets => Ok(frame.asset_names().join("\n")),
        }
    }

    /// Renders the keypad layout
    pub fn render_keypad(&self, keypad: &Keypad) -> CliResult<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(keypad.buttons())?),
            OutputFormat::Text | OutputFormat::Assets => Ok((0..keypad.row_count())
                .map(|row| {
                    keypad
                        .row(row)
                        .map(|button| self.key_cell(button))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Prints a warning to stderr
    pub fn warning(&self, message: &str) {
        let prefix = if self.use_color {
            style("warning:").yellow().bold().to_string()
        } else {
            "warning:".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    fn frame_text(&self, frame: &DisplayFrame) -> String {
        let op = frame
            .operator
            .operator()
            .map_or_else(|| " ".to_string(), |op| op.sign().to_string());
        let digits = frame.text();

        let mut line = if self.use_color {
            format!("{} │{}│", style(op).cyan().bold(), style(digits).bold())
        } else {
            format!("{op} │{digits}│")
        };
        if frame.negative {
            line.push_str(&self.marker("negative"));
        }
        if frame.overflow {
            line.push_str(&self.marker("overflow"));
        }
        line
    }

    fn marker(&self, text: &str) -> String {
        if self.use_color {
            format!(" {}", style(text).red())
        } else {
            format!(" {text}")
        }
    }

    fn key_cell(&self, button: &KeypadButtonDef) -> String {
        let inner = button.span() * 6 - 3;
        let label = format!("{:^inner$}", button.action.label());
        if self.use_color && matches!(button.action, KeypadAction::Operator(_)) {
            format!("[{}]", style(label).cyan())
        } else {
            format!("[{label}]")
        }
    }
}
