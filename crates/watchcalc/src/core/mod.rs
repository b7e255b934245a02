//! Core arithmetic for the watch calculator
//!
//! - `accumulator`: the two-operand state machine driven by button presses
//! - `operations`: the closed set of binary operators
//! - [`DisplayBudget`]: decides whether a value still fits on the display

pub mod accumulator;
mod operations;

pub use accumulator::{Accumulator, Phase};
pub use operations::Operator;

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit on the display
    #[error("Overflow: {value} does not fit in {width} display cells")]
    Overflow {
        /// Canonical string of the rejected value
        value: String,
        /// Display width in cells
        width: usize,
    },

    /// Arithmetic left the range of the decimal type
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Digit outside 0-9
    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),

    /// Keyboard key with no keypad mapping
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    /// Display configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CalcError {
    /// Returns true for the errors that blank the display
    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(
            self,
            Self::Overflow { .. } | Self::OutOfRange(_) | Self::DivisionByZero
        )
    }
}

/// Display budget - the range of values the digit row can show
///
/// A value fits when its integer part, sign included, occupies no more
/// cells than the display is wide. Fractional digits never overflow; the
/// formatter cuts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBudget {
    width: usize,
}

impl Default for DisplayBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBudget {
    /// Digit cells on the watch face
    pub const DEFAULT_WIDTH: usize = 9;

    /// Creates a budget for the default nine-cell display
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
        }
    }

    /// Creates a budget for a custom display width
    #[must_use]
    pub const fn with_width(width: usize) -> Self {
        Self { width }
    }

    /// Returns the display width in cells
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns true if `value` can be shown without losing integer digits
    #[must_use]
    pub fn fits(&self, value: Decimal) -> bool {
        integer_cells(value) <= self.width
    }

    /// Validates a value, returning an overflow error if it does not fit
    pub fn check(&self, value: Decimal) -> CalcResult<Decimal> {
        if self.fits(value) {
            Ok(value)
        } else {
            Err(CalcError::Overflow {
                value: value.normalize().to_string(),
                width: self.width,
            })
        }
    }
}

/// Cells taken by the integer part of `value`, including a minus sign
fn integer_cells(value: Decimal) -> usize {
    let int_part = value.trunc().abs().normalize().to_string();
    let sign = usize::from(value.is_sign_negative() && !value.is_zero());
    int_part.len() + sign
}
