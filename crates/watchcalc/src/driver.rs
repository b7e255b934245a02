//! Calculator driver
//!
//! Glues keypad actions to the accumulator and produces display frames.
//! Test logic written against [`CalculatorDriver`] runs against any
//! implementation; the `verify_*` functions below are those shared checks.

use tracing::{debug, warn};

use crate::config::DisplayConfig;
use crate::core::{Accumulator, CalcError, CalcResult, Operator, Phase};
use crate::display::{DisplayFormatter, DisplayFrame};
use crate::keypad::{Keypad, KeypadAction};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Performs one keypad action
    ///
    /// Overflow and division by zero are returned as errors but leave the
    /// driver usable; the display shows the overflow state.
    fn press(&mut self, action: KeypadAction) -> CalcResult<()>;

    /// Returns the frame to render now
    fn frame(&self) -> DisplayFrame;

    /// Resets the calculator
    fn clear(&mut self);

    /// Parses a key sequence and presses every key
    ///
    /// Overflow along the way does not stop the sequence.
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        for action in Keypad::parse_keys(keys)? {
            match self.press(action) {
                Err(e) if e.is_overflow() => {}
                other => other?,
            }
        }
        Ok(())
    }

    /// Returns the digit row as plain text
    fn display_text(&self) -> String {
        self.frame().text()
    }
}

/// Driver for the watch face
#[derive(Debug, Clone)]
pub struct WatchDriver {
    accumulator: Accumulator,
    formatter: DisplayFormatter,
    keypad: Keypad,
    last_error: Option<CalcError>,
}

impl Default for WatchDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchDriver {
    /// Creates a driver for the nine-cell display
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DisplayConfig::default())
    }

    /// Creates a driver for a configured display
    #[must_use]
    pub fn with_config(config: DisplayConfig) -> Self {
        Self {
            accumulator: Accumulator::with_budget(config.budget()),
            formatter: config.formatter(),
            keypad: Keypad::new(),
            last_error: None,
        }
    }

    /// Returns the underlying accumulator
    #[must_use]
    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.accumulator.phase()
    }

    /// Returns the error from the most recent press, if it failed
    #[must_use]
    pub const fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Taps a button by element ID
    pub fn tap(&mut self, element_id: &str) -> CalcResult<()> {
        let action = self
            .keypad
            .handle_click(element_id)
            .ok_or_else(|| CalcError::UnknownKey(element_id.to_string()))?;
        self.press(action)
    }

    fn dispatch(&mut self, action: KeypadAction) -> CalcResult<()> {
        match action {
            KeypadAction::Digit(d) => self.accumulator.enter_digit(d),
            KeypadAction::DecimalPoint => {
                self.accumulator.enter_decimal_point();
                Ok(())
            }
            KeypadAction::Operator(op) => self.accumulator.select_operator(op),
            KeypadAction::Equals => self.accumulator.evaluate().map(|_| ()),
            KeypadAction::Clear => {
                self.accumulator.clear();
                Ok(())
            }
        }
    }
}

impl CalculatorDriver for WatchDriver {
    fn press(&mut self, action: KeypadAction) -> CalcResult<()> {
        let before = self.accumulator.phase();
        let result = self.dispatch(action);
        let after = self.accumulator.phase();
        debug!(key = action.symbol(), ?before, ?after, value = %self.accumulator.current_value(), "key pressed");

        if let Err(e) = &result {
            if !e.is_overflow() {
                warn!(key = action.symbol(), error = %e, "key rejected");
            }
        }
        self.last_error = result.clone().err();
        result
    }

    fn frame(&self) -> DisplayFrame {
        self.formatter.frame(&self.accumulator)
    }

    fn clear(&mut self) {
        self.accumulator.clear();
        self.last_error = None;
    }
}

// ===== Shared driver checks =====
// These run against ANY CalculatorDriver implementation

/// Verifies the four operators on whole numbers
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("2+3=", "5"), ("10-4=", "6"), ("6*7=", "42"), ("20/4=", "5")] {
        driver.clear();
        assert!(driver.press_keys(keys).is_ok(), "{keys}");
        assert_eq!(driver.display_text().trim_start(), expected, "{keys}");
    }
    driver.clear();
}

/// Verifies operators chain left to right with no precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("2+3*4=").is_ok());
    assert_eq!(driver.display_text().trim_start(), "20");

    driver.clear();
    assert!(driver.press_keys("10-2-3=").is_ok());
    assert_eq!(driver.display_text().trim_start(), "5");
    driver.clear();
}

/// Verifies decimal entry and a fractional result
pub fn verify_decimals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("5.2").is_ok());
    assert_eq!(driver.display_text().trim_start(), "5.2");

    driver.clear();
    assert!(driver.press_keys("1/4=").is_ok());
    assert_eq!(driver.display_text().trim_start(), "0.25");
    driver.clear();
}

/// Verifies overflow blanks the display and a digit recovers it
pub fn verify_overflow<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("99999*99999=").is_ok());
    let frame = driver.frame();
    assert!(frame.overflow);
    assert!(frame.text().trim().is_empty());

    assert!(driver.press_keys("+").is_ok());
    assert!(driver.frame().operator.operator().is_none());

    assert!(driver.press_keys("4").is_ok());
    assert!(!driver.frame().overflow);
    assert_eq!(driver.display_text().trim_start(), "4");
    driver.clear();
}

/// Verifies division by zero is reported and blanks the display
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("8/0").is_ok());
    assert_eq!(
        driver.press(KeypadAction::Equals),
        Err(CalcError::DivisionByZero)
    );
    assert!(driver.frame().overflow);
    driver.clear();
}

/// Verifies the operator indicator follows the pending operator
pub fn verify_operator_indicator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert!(driver.press_keys("3-").is_ok());
    assert_eq!(driver.frame().operator.operator(), Some(Operator::Subtract));
    assert!(driver.press_keys("1=").is_ok());
    assert_eq!(driver.frame().operator.operator(), None);
    driver.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_driver_basic_arithmetic() {
        verify_basic_arithmetic(&mut WatchDriver::new());
    }

    #[test]
    fn test_watch_driver_chaining() {
        verify_chaining(&mut WatchDriver::new());
    }

    #[test]
    fn test_watch_driver_decimals() {
        verify_decimals(&mut WatchDriver::new());
    }

    #[test]
    fn test_watch_driver_overflow() {
        verify_overflow(&mut WatchDriver::new());
    }

    #[test]
    fn test_watch_driver_division_by_zero() {
        verify_division_by_zero(&mut WatchDriver::new());
    }

    #[test]
    fn test_watch_driver_operator_indicator() {
        verify_operator_indicator(&mut WatchDriver::new());
    }

    #[test]
    fn test_press_records_last_error() {
        let mut driver = WatchDriver::new();
        driver.press_keys("1/0").unwrap();
        assert!(driver.press(KeypadAction::Equals).is_err());
        assert_eq!(driver.last_error(), Some(&CalcError::DivisionByZero));
        assert_eq!(driver.phase(), Phase::Overflow);

        driver.press(KeypadAction::Digit(2)).unwrap();
        assert_eq!(driver.last_error(), None);
    }

    #[test]
    fn test_press_invalid_digit() {
        let mut driver = WatchDriver::new();
        assert_eq!(
            driver.press(KeypadAction::Digit(10)),
            Err(CalcError::InvalidDigit(10))
        );
        assert!(driver.press_keys("1").is_ok());
    }

    #[test]
    fn test_press_keys_unknown_key_presses_nothing() {
        let mut driver = WatchDriver::new();
        assert_eq!(
            driver.press_keys("12(3"),
            Err(CalcError::UnknownKey("(".into()))
        );
        assert_eq!(driver.phase(), Phase::Idle);
    }

    #[test]
    fn test_press_keys_continues_after_overflow() {
        let mut driver = WatchDriver::new();
        driver.press_keys("999999999+1= 7").unwrap();
        assert_eq!(driver.display_text().trim_start(), "7");
    }

    #[test]
    fn test_tap_by_element_id() {
        let mut driver = WatchDriver::new();
        driver.tap("btn-4").unwrap();
        driver.tap("btn-multiply").unwrap();
        driver.tap("btn-2").unwrap();
        driver.tap("btn-equals").unwrap();
        assert_eq!(driver.display_text(), "        8");
        assert!(matches!(driver.tap("btn-power"), Err(CalcError::UnknownKey(_))));
    }

    #[test]
    fn test_configured_width() {
        let mut driver = WatchDriver::with_config(DisplayConfig::with_width(3).unwrap());
        driver.press_keys("999+1=").unwrap();
        assert!(driver.frame().overflow);
        assert_eq!(driver.frame().digits.len(), 3);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut driver = WatchDriver::new();
        driver.press_keys("12+3").unwrap();
        driver.clear();
        assert_eq!(driver.phase(), Phase::Idle);
        assert_eq!(driver.display_text(), "        0");
        assert_eq!(driver.accumulator(), &Accumulator::new());
    }

    #[test]
    fn test_keypad_accessor() {
        assert_eq!(WatchDriver::new().keypad().button_count(), 17);
    }
}
