//! Two-operand accumulator driven by button presses
//!
//! ```text
//!            digit                 operator                 digit
//!   Idle ───────────► First ───────────────► Pending ───────────► Second
//!    ▲                  │                       ▲                   │
//!    │     equals       │                       │    operator       │
//!    └──────────────────┴───────────────────────┴───────────────────┘
//!                         (evaluates before storing the new operator)
//!
//!   Any evaluation that does not fit the display ──► Overflow
//!   Overflow ──(digit or clear)──► fresh entry
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, DisplayBudget, Operator};

/// Deepest fractional digit the decimal type can hold
const MAX_SCALE: u32 = 28;

/// Where the accumulator is in its entry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Showing zero or a finished result; the next digit starts a new number
    Idle,
    /// Typing the first operand
    EnteringFirstOperand,
    /// Operator chosen, second operand not started yet
    OperatorPending,
    /// Typing the second operand
    EnteringSecondOperand,
    /// Result did not fit; display blank until a digit or clear
    Overflow,
}

/// Arithmetic accumulator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    previous_value: Decimal,
    current_value: Decimal,
    pending_operator: Option<Operator>,
    operator_locked: bool,
    decimal_entry: bool,
    overflow: bool,
    budget: DisplayBudget,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates a cleared accumulator for the default display
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(DisplayBudget::new())
    }

    /// Creates a cleared accumulator with a custom display budget
    #[must_use]
    pub fn with_budget(budget: DisplayBudget) -> Self {
        Self {
            previous_value: Decimal::ZERO,
            current_value: Decimal::ZERO,
            pending_operator: None,
            operator_locked: false,
            decimal_entry: false,
            overflow: false,
            budget,
        }
    }

    /// Returns the value on the display
    #[must_use]
    pub fn current_value(&self) -> Decimal {
        self.current_value
    }

    /// Returns the stored left-hand operand
    #[must_use]
    pub fn previous_value(&self) -> Decimal {
        self.previous_value
    }

    /// Returns the operator waiting for its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Returns true while digits extend the operand being typed
    #[must_use]
    pub fn operator_locked(&self) -> bool {
        self.operator_locked
    }

    /// Returns true once the decimal point has been pressed
    #[must_use]
    pub fn decimal_entry(&self) -> bool {
        self.decimal_entry
    }

    /// Returns true while the overflow flag is raised
    #[must_use]
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Returns the display budget used for overflow checks
    #[must_use]
    pub fn budget(&self) -> DisplayBudget {
        self.budget
    }

    /// Derives the current phase from the state flags
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.overflow, self.pending_operator, self.operator_locked) {
            (true, _, _) => Phase::Overflow,
            (false, None, false) => Phase::Idle,
            (false, None, true) => Phase::EnteringFirstOperand,
            (false, Some(_), false) => Phase::OperatorPending,
            (false, Some(_), true) => Phase::EnteringSecondOperand,
        }
    }

    /// Appends a digit to the operand being entered
    ///
    /// The first digit after an operator, a result or an overflow starts a
    /// fresh operand. Digits beyond the decimal type's capacity are dropped.
    pub fn enter_digit(&mut self, digit: u8) -> CalcResult<()> {
        if digit > 9 {
            return Err(CalcError::InvalidDigit(digit));
        }

        self.overflow = false;
        if !self.operator_locked {
            self.operator_locked = true;
            self.current_value = Decimal::ZERO;
        }

        let next = if self.decimal_entry {
            append_fraction_digit(self.current_value, digit)
        } else {
            append_integer_digit(self.current_value, digit)
        };

        match next {
            Some(value) => self.current_value = value,
            None => tracing::debug!(digit, value = %self.current_value, "digit dropped at capacity"),
        }
        Ok(())
    }

    /// Switches entry to the fractional part
    pub fn enter_decimal_point(&mut self) {
        self.decimal_entry = true;
    }

    /// Chooses the operator for the next computation
    ///
    /// Ignored while overflowed. When an operand was being typed, the
    /// pending computation is evaluated first so operators chain left to
    /// right.
    pub fn select_operator(&mut self, op: Operator) -> CalcResult<()> {
        if self.overflow {
            tracing::debug!(operator = op.symbol(), "operator ignored during overflow");
            return Ok(());
        }

        if self.operator_locked {
            self.evaluate()?;
        }

        self.pending_operator = Some(op);
        self.previous_value = self.current_value;
        tracing::debug!(operator = op.symbol(), operand = %self.previous_value, "operator selected");
        Ok(())
    }

    /// Applies the pending operator to the stored operands
    ///
    /// On overflow or division by zero the whole state is cleared and the
    /// overflow flag raised before the error is returned.
    pub fn evaluate(&mut self) -> CalcResult<Decimal> {
        let outcome = match self.pending_operator {
            Some(op) => op.apply(self.previous_value, self.current_value),
            None => Ok(self.current_value),
        }
        .and_then(|value| self.budget.check(value));

        match outcome {
            Ok(value) => {
                self.current_value = value;
                self.pending_operator = None;
                self.operator_locked = false;
                self.decimal_entry = false;
                tracing::debug!(result = %value, "evaluated");
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "evaluation overflowed, clearing");
                self.clear();
                self.overflow = true;
                Err(err)
            }
        }
    }

    /// Resets every field to its initial value
    pub fn clear(&mut self) {
        *self = Self::with_budget(self.budget);
    }
}

fn append_integer_digit(value: Decimal, digit: u8) -> Option<Decimal> {
    value
        .checked_mul(Decimal::TEN)?
        .checked_add(Decimal::from(digit))
}

/// Adds `digit` one place after the current last fractional digit, keeping
/// typed trailing zeros in the scale.
fn append_fraction_digit(value: Decimal, digit: u8) -> Option<Decimal> {
    let scale = value.scale() + 1;
    if scale > MAX_SCALE {
        return None;
    }
    let step = Decimal::new(i64::from(digit), scale);
    let mut next = if value.is_sign_negative() {
        value.checked_sub(step)?
    } else {
        value.checked_add(step)?
    };
    // A zero step leaves the scale untouched; force it so "5.0" stays "5.0"
    next.rescale(scale);
    (next.scale() == scale).then_some(next)
}
