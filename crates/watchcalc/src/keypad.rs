//! Watch keypad layout and key mapping
//!
//! Layout:
//! ```text
//! [ 7 ] [ 8 ] [ 9 ] [  clear  ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ × ] [ ÷ ]
//! [    0    ] [ . ] [    =    ]
//! ```
//!
//! Columns are logical: a wide button takes one column index but two cells.

use serde::Serialize;

use crate::core::{CalcError, CalcResult, Operator};

const DIGIT_SYMBOLS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Switch to fractional entry
    DecimalPoint,
    /// Select an operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset the calculator
    Clear,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.sign().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
        }
    }

    /// Returns the asset symbol used for the button art
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_SYMBOLS.get(usize::from(*d)).copied().unwrap_or("empty"),
            Self::DecimalPoint => "dot",
            Self::Operator(op) => op.symbol(),
            Self::Equals => "equals",
            Self::Clear => "clear",
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// Element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Logical column within the row (0-indexed)
    pub col: usize,
    /// Button spans two cells
    pub wide: bool,
}

impl KeypadButtonDef {
    /// Creates a normal-width button
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            action,
            id: format!("btn-{}", action.symbol()),
            row,
            col,
            wide: false,
        }
    }

    /// Creates a double-width button
    #[must_use]
    pub fn wide(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            wide: true,
            ..Self::new(action, row, col)
        }
    }

    /// Number of cells the button occupies
    #[must_use]
    pub const fn span(&self) -> usize {
        if self.wide {
            2
        } else {
            1
        }
    }
}

/// The watch keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Cells per row
    pub const ROW_CELLS: usize = 5;

    /// Creates the standard watch keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, DecimalPoint, Digit, Equals};
        let op = KeypadAction::Operator;

        let buttons = vec![
            // Row 0: 7 8 9 clear
            KeypadButtonDef::new(Digit(7), 0, 0),
            KeypadButtonDef::new(Digit(8), 0, 1),
            KeypadButtonDef::new(Digit(9), 0, 2),
            KeypadButtonDef::wide(Clear, 0, 3),
            // Row 1: 4 5 6 + -
            KeypadButtonDef::new(Digit(4), 1, 0),
            KeypadButtonDef::new(Digit(5), 1, 1),
            KeypadButtonDef::new(Digit(6), 1, 2),
            KeypadButtonDef::new(op(Operator::Add), 1, 3),
            KeypadButtonDef::new(op(Operator::Subtract), 1, 4),
            // Row 2: 1 2 3 × ÷
            KeypadButtonDef::new(Digit(1), 2, 0),
            KeypadButtonDef::new(Digit(2), 2, 1),
            KeypadButtonDef::new(Digit(3), 2, 2),
            KeypadButtonDef::new(op(Operator::Multiply), 2, 3),
            KeypadButtonDef::new(op(Operator::Divide), 2, 4),
            // Row 3: 0 . =
            KeypadButtonDef::wide(Digit(0), 3, 0),
            KeypadButtonDef::new(DecimalPoint, 3, 1),
            KeypadButtonDef::wide(Equals, 3, 2),
        ];

        Self { buttons, rows: 4 }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the number of rows
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Iterates the buttons of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &KeypadButtonDef> {
        self.buttons.iter().filter(move |b| b.row == row)
    }

    /// Gets a button by row and logical column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by asset symbol
    #[must_use]
    pub fn find_button_by_symbol(&self, symbol: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action.symbol() == symbol)
    }

    /// Finds the button that performs `action`
    #[must_use]
    pub fn find_button_for(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Processes a button tap and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "0" => Some(KeypadAction::Digit(0)),
            "1" => Some(KeypadAction::Digit(1)),
            "2" => Some(KeypadAction::Digit(2)),
            "3" => Some(KeypadAction::Digit(3)),
            "4" => Some(KeypadAction::Digit(4)),
            "5" => Some(KeypadAction::Digit(5)),
            "6" => Some(KeypadAction::Digit(6)),
            "7" => Some(KeypadAction::Digit(7)),
            "8" => Some(KeypadAction::Digit(8)),
            "9" => Some(KeypadAction::Digit(9)),
            "." => Some(KeypadAction::DecimalPoint),
            "+" => Some(KeypadAction::Operator(Operator::Add)),
            "-" => Some(KeypadAction::Operator(Operator::Subtract)),
            "*" | "x" | "×" => Some(KeypadAction::Operator(Operator::Multiply)),
            "/" | "÷" => Some(KeypadAction::Operator(Operator::Divide)),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "c" | "C" => Some(KeypadAction::Clear),
            _ => None,
        }
    }

    /// Parses a key sequence into actions
    ///
    /// Whitespace separates words; a word is either a whole key name
    /// (`Enter`, `Escape`, `+`) or a run of single-character keys (`12+7=`).
    pub fn parse_keys(keys: &str) -> CalcResult<Vec<KeypadAction>> {
        let mut actions = Vec::new();
        for word in keys.split_whitespace() {
            if let Some(action) = Self::key_to_action(word) {
                actions.push(action);
                continue;
            }
            for c in word.chars() {
                let mut buf = [0u8; 4];
                let key = c.encode_utf8(&mut buf);
                let action =
                    Self::key_to_action(key).ok_or_else(|| CalcError::UnknownKey(key.to_string()))?;
                actions.push(action);
            }
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadAction tests =====

    #[test]
    fn test_keypad_action_label() {
        assert_eq!(KeypadAction::Digit(5).label(), "5");
        assert_eq!(KeypadAction::DecimalPoint.label(), ".");
        assert_eq!(KeypadAction::Operator(Operator::Multiply).label(), "×");
        assert_eq!(KeypadAction::Equals.label(), "=");
        assert_eq!(KeypadAction::Clear.label(), "C");
    }

    #[test]
    fn test_keypad_action_symbol() {
        assert_eq!(KeypadAction::Digit(0).symbol(), "0");
        assert_eq!(KeypadAction::DecimalPoint.symbol(), "dot");
        assert_eq!(KeypadAction::Operator(Operator::Subtract).symbol(), "subtract");
        assert_eq!(KeypadAction::Equals.symbol(), "equals");
        assert_eq!(KeypadAction::Clear.symbol(), "clear");
    }

    // ===== KeypadButtonDef tests =====

    #[test]
    fn test_button_def_ids() {
        assert_eq!(KeypadButtonDef::new(KeypadAction::Digit(5), 1, 1).id, "btn-5");
        assert_eq!(
            KeypadButtonDef::new(KeypadAction::Operator(Operator::Add), 1, 3).id,
            "btn-add"
        );
        assert_eq!(KeypadButtonDef::new(KeypadAction::DecimalPoint, 3, 1).id, "btn-dot");
    }

    #[test]
    fn test_button_def_span() {
        assert_eq!(KeypadButtonDef::new(KeypadAction::Digit(1), 0, 0).span(), 1);
        assert_eq!(KeypadButtonDef::wide(KeypadAction::Clear, 0, 3).span(), 2);
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_has_every_key() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 17);
        assert_eq!(keypad.row_count(), 4);
        for d in 0..=9 {
            assert!(keypad.find_button_for(KeypadAction::Digit(d)).is_some());
        }
        for op in Operator::ALL {
            assert!(keypad.find_button_for(KeypadAction::Operator(op)).is_some());
        }
    }

    #[test]
    fn test_every_row_fills_five_cells() {
        let keypad = Keypad::new();
        for row in 0..keypad.row_count() {
            let cells: usize = keypad.row(row).map(KeypadButtonDef::span).sum();
            assert_eq!(cells, Keypad::ROW_CELLS, "row {row}");
        }
    }

    #[test]
    fn test_wide_buttons() {
        let keypad = Keypad::new();
        let wide: Vec<_> = keypad
            .buttons()
            .iter()
            .filter(|b| b.wide)
            .map(|b| b.action)
            .collect();
        assert_eq!(
            wide,
            [KeypadAction::Clear, KeypadAction::Digit(0), KeypadAction::Equals]
        );
    }

    #[test]
    fn test_get_button_at() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(0, 0).unwrap().action, KeypadAction::Digit(7));
        assert_eq!(keypad.get_button_at(0, 3).unwrap().action, KeypadAction::Clear);
        assert_eq!(
            keypad.get_button_at(2, 4).unwrap().action,
            KeypadAction::Operator(Operator::Divide)
        );
        assert_eq!(keypad.get_button_at(3, 2).unwrap().action, KeypadAction::Equals);
        assert!(keypad.get_button_at(3, 3).is_none());
        assert!(keypad.get_button_at(4, 0).is_none());
    }

    #[test]
    fn test_find_button_by_symbol() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.find_button_by_symbol("multiply").unwrap().action,
            KeypadAction::Operator(Operator::Multiply)
        );
        assert!(keypad.find_button_by_symbol("power").is_none());
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-equals"), Some(KeypadAction::Equals));
        assert_eq!(keypad.handle_click("btn-missing"), None);
    }

    #[test]
    fn test_key_to_action() {
        assert_eq!(Keypad::key_to_action("7"), Some(KeypadAction::Digit(7)));
        assert_eq!(Keypad::key_to_action("."), Some(KeypadAction::DecimalPoint));
        assert_eq!(
            Keypad::key_to_action("x"),
            Some(KeypadAction::Operator(Operator::Multiply))
        );
        assert_eq!(Keypad::key_to_action("Enter"), Some(KeypadAction::Equals));
        assert_eq!(Keypad::key_to_action("Escape"), Some(KeypadAction::Clear));
        assert_eq!(Keypad::key_to_action("^"), None);
        assert_eq!(Keypad::key_to_action("("), None);
    }

    #[test]
    fn test_parse_keys_compact() {
        let actions = Keypad::parse_keys("12+7=").unwrap();
        assert_eq!(
            actions,
            [
                KeypadAction::Digit(1),
                KeypadAction::Digit(2),
                KeypadAction::Operator(Operator::Add),
                KeypadAction::Digit(7),
                KeypadAction::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_keys_words() {
        let actions = Keypad::parse_keys("9 ÷ 3 Enter Escape").unwrap();
        assert_eq!(
            actions,
            [
                KeypadAction::Digit(9),
                KeypadAction::Operator(Operator::Divide),
                KeypadAction::Digit(3),
                KeypadAction::Equals,
                KeypadAction::Clear,
            ]
        );
    }

    #[test]
    fn test_parse_keys_unknown() {
        assert_eq!(
            Keypad::parse_keys("2^3"),
            Err(CalcError::UnknownKey("^".into()))
        );
    }

    #[test]
    fn test_parse_keys_empty() {
        assert!(Keypad::parse_keys("   ").unwrap().is_empty());
    }
}
