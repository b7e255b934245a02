//! watchcalc - Watch-Face Calculator Core
//!
//! The arithmetic behind a four-function calculator on a nine-cell watch
//! display: digit entry, left-to-right operator chaining, overflow
//! detection, and the glyph tokens a presentation layer draws.
//!
//! # Layers
//!
//! - [`core`]: the [`Accumulator`](core::Accumulator) state machine, operators and the display budget
//! - [`display`]: fixed-width formatting into [`Glyph`](display::Glyph) tokens
//! - [`keypad`]: the watch keypad layout and keyboard mapping
//! - [`driver`]: glue from keypad actions to display frames
//! - [`config`]: display width configuration
//!
//! # Example
//!
//! ```rust
//! use watchcalc::prelude::*;
//!
//! let mut driver = WatchDriver::new();
//! driver.press_keys("12+7=").unwrap();
//!
//! let frame = driver.frame();
//! assert_eq!(frame.text(), "       19");
//! assert_eq!(frame.digits[7], Glyph::Digit(1));
//!
//! // Results that do not fit blank the display
//! driver.press_keys("999999999+1=").unwrap();
//! assert!(driver.frame().overflow);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::cast_possible_truncation
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::DisplayConfig;
    pub use crate::core::{Accumulator, CalcError, CalcResult, DisplayBudget, Operator, Phase};
    pub use crate::display::{
        AssetLayer, DisplayFormatter, DisplayFrame, Glyph, OperatorIndicator, ENDCAP_ASSET,
    };
    pub use crate::driver::{CalculatorDriver, WatchDriver};
    pub use crate::keypad::{Keypad, KeypadAction, KeypadButtonDef};
    pub use rust_decimal::Decimal;
}
