//! Display configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, DisplayBudget};
use crate::display::DisplayFormatter;

/// Display settings loaded from JSON
///
/// ```json
/// { "width": 9 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Number of digit cells
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DisplayBudget::DEFAULT_WIDTH,
        }
    }
}

impl DisplayConfig {
    /// Narrowest supported display
    pub const MIN_WIDTH: usize = 1;
    /// Widest supported display
    pub const MAX_WIDTH: usize = 20;

    /// Creates a config for the given width, validated
    pub fn with_width(width: usize) -> CalcResult<Self> {
        let config = Self { width };
        config.validate()?;
        Ok(config)
    }

    /// Checks the width is within the supported range
    pub fn validate(&self) -> CalcResult<()> {
        if (Self::MIN_WIDTH..=Self::MAX_WIDTH).contains(&self.width) {
            Ok(())
        } else {
            Err(CalcError::InvalidConfig(format!(
                "width must be between {} and {}, got {}",
                Self::MIN_WIDTH,
                Self::MAX_WIDTH,
                self.width
            )))
        }
    }

    /// Parses and validates a JSON config
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Overflow budget for this display
    #[must_use]
    pub const fn budget(&self) -> DisplayBudget {
        DisplayBudget::with_width(self.width)
    }

    /// Formatter for this display
    #[must_use]
    pub const fn formatter(&self) -> DisplayFormatter {
        DisplayFormatter::with_width(self.width)
    }
}
