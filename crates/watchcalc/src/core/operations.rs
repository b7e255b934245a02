//! Binary operators with checked decimal arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// The four operator keys on the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the asset symbol used by the operator indicator and keypad art
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Returns the printable operator sign
    #[must_use]
    pub const fn sign(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Parses an asset symbol back into an operator
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Applies the operator as `lhs <op> rhs`
    ///
    /// Results outside the decimal type's range are reported as overflow.
    pub fn apply(&self, lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
        let result = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs.is_zero() {
                    return Err(CalcError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };

        result
            .map(|value| value.normalize())
            .ok_or_else(|| CalcError::OutOfRange(format!("{lhs} {} {rhs}", self.sign())))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sign())
    }
}
