//! Fixed-width digit display
//!
//! Turns the accumulator into a row of glyph tokens. Rendering the tokens
//! (images, terminal cells) is left to the presentation layer; this module
//! only decides which token goes in which cell.
//!
//! ```text
//!  ┌────┬───┬───┬───┬───┬───┬───┬───┬───┬───┬──┐
//!  │ op │ · │ · │ · │ · │ 1 │ 2 │ . │ 5 │ 7 │ ▌│   op indicator, 9 cells, endcap
//!  └────┴───┴───┴───┴───┴───┴───┴───┴───┴───┴──┘
//! ```

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::core::{Accumulator, DisplayBudget, Operator};

const DIGIT_TOKENS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Asset name of the cap drawn after the last digit cell
pub const ENDCAP_ASSET: &str = "output-endcap-d";

/// One display cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Decimal,
    /// A blank cell (padding, minus sign, overflow)
    Empty,
}

impl Glyph {
    /// Maps a rendered character to its glyph
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c {
            '.' => Self::Decimal,
            _ => c
                .to_digit(10)
                .map_or(Self::Empty, |d| Self::Digit(d as u8)),
        }
    }

    /// Returns the symbolic token for this glyph
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_TOKENS.get(usize::from(*d)).copied().unwrap_or("empty"),
            Self::Decimal => "decimal",
            Self::Empty => "empty",
        }
    }

    /// Returns the character used for plain-text rendering
    #[must_use]
    pub fn to_char(&self) -> char {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10).unwrap_or(' '),
            Self::Decimal => '.',
            Self::Empty => ' ',
        }
    }

    /// Returns the image asset name for one layer of this glyph
    #[must_use]
    pub fn asset_name(&self, layer: AssetLayer) -> String {
        format!("output-digit-{}-{}", self.token(), layer.suffix())
    }
}

impl Serialize for Glyph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// The two tinted layers each display image is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetLayer {
    /// Body, drawn in the lighter foreground colour
    Body,
    /// Detail, drawn in the darker foreground colour
    Detail,
}

impl AssetLayer {
    /// Both layers in draw order
    pub const ALL: [Self; 2] = [Self::Body, Self::Detail];

    /// Returns the asset-name suffix for this layer
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Body => "b",
            Self::Detail => "d",
        }
    }
}

/// The operator cell left of the digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatorIndicator(Option<Operator>);

impl OperatorIndicator {
    /// Creates an indicator for a pending operator
    #[must_use]
    pub const fn new(operator: Option<Operator>) -> Self {
        Self(operator)
    }

    /// Returns the operator being shown, if any
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        self.0
    }

    /// Returns the symbolic token (`"empty"` when no operator is pending)
    #[must_use]
    pub fn token(&self) -> &'static str {
        self.0.map_or("empty", |op| op.symbol())
    }

    /// Returns the image asset name for one layer of the indicator
    #[must_use]
    pub fn asset_name(&self, layer: AssetLayer) -> String {
        format!("output-function-{}-{}", self.token(), layer.suffix())
    }
}

impl Serialize for OperatorIndicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Everything the presentation layer reads in one render cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFrame {
    /// Operator indicator cell
    pub operator: OperatorIndicator,
    /// Digit cells, left to right
    pub digits: Vec<Glyph>,
    /// The value is negative (the minus sign itself renders blank)
    pub negative: bool,
    /// The display is blanked by overflow
    pub overflow: bool,
}

impl DisplayFrame {
    /// Renders the digit cells as plain text, blanks as spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.digits.iter().map(Glyph::to_char).collect()
    }

    /// Lists every image asset in draw order: indicator, digits, endcap
    #[must_use]
    pub fn asset_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(2 * (self.digits.len() + 1) + 1);
        for layer in AssetLayer::ALL {
            names.push(self.operator.asset_name(layer));
        }
        for glyph in &self.digits {
            for layer in AssetLayer::ALL {
                names.push(glyph.asset_name(layer));
            }
        }
        names.push(ENDCAP_ASSET.to_string());
        names
    }
}

/// Fixed-width formatter for the digit row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormatter {
    width: usize,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayFormatter {
    /// Creates a formatter for the nine-cell watch display
    #[must_use]
    pub const fn new() -> Self {
        Self::with_width(DisplayBudget::DEFAULT_WIDTH)
    }

    /// Creates a formatter for a custom number of cells
    #[must_use]
    pub const fn with_width(width: usize) -> Self {
        Self { width }
    }

    /// Returns the number of digit cells
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Renders a value as the text shown in the digit cells, unpadded
    ///
    /// A trailing `.0` is stripped. Text wider than the display keeps its
    /// leading characters; a dangling decimal point is dropped.
    #[must_use]
    pub fn render_value(&self, value: Decimal) -> String {
        let mut text = value.to_string();
        if text.ends_with(".0") {
            text.truncate(text.len() - 2);
        }
        if text.len() > self.width {
            text.truncate(self.width);
            if text.ends_with('.') {
                text.pop();
            }
        }
        text
    }

    /// Formats the accumulator's value into exactly `width` glyphs
    #[must_use]
    pub fn format_digits(&self, accumulator: &Accumulator) -> Vec<Glyph> {
        if accumulator.overflow() {
            return vec![Glyph::Empty; self.width];
        }
        let text = self.render_value(accumulator.current_value());
        let padding = self.width.saturating_sub(text.len());
        std::iter::repeat(Glyph::Empty)
            .take(padding)
            .chain(text.chars().map(Glyph::from_char))
            .collect()
    }

    /// Builds the full frame for one render cycle
    #[must_use]
    pub fn frame(&self, accumulator: &Accumulator) -> DisplayFrame {
        let value = accumulator.current_value();
        DisplayFrame {
            operator: OperatorIndicator::new(accumulator.pending_operator()),
            digits: self.format_digits(accumulator),
            negative: !accumulator.overflow() && value.is_sign_negative() && !value.is_zero(),
            overflow: accumulator.overflow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator_showing(keys: &str) -> Accumulator {
        let mut acc = Accumulator::new();
        for c in keys.chars() {
            match c {
                '.' => acc.enter_decimal_point(),
                '+' => acc.select_operator(Operator::Add).unwrap(),
                '-' => acc.select_operator(Operator::Subtract).unwrap(),
                '/' => acc.select_operator(Operator::Divide).unwrap(),
                '=' => {
                    let _ = acc.evaluate();
                }
                d => acc.enter_digit(d.to_digit(10).unwrap() as u8).unwrap(),
            }
        }
        acc
    }

    fn tokens(glyphs: &[Glyph]) -> Vec<&'static str> {
        glyphs.iter().map(Glyph::token).collect()
    }

    // ===== Glyph =====

    #[test]
    fn test_glyph_from_char() {
        assert_eq!(Glyph::from_char('7'), Glyph::Digit(7));
        assert_eq!(Glyph::from_char('.'), Glyph::Decimal);
        assert_eq!(Glyph::from_char('-'), Glyph::Empty);
        assert_eq!(Glyph::from_char(' '), Glyph::Empty);
    }

    #[test]
    fn test_glyph_tokens() {
        for d in 0..=9u8 {
            assert_eq!(Glyph::Digit(d).token(), d.to_string());
        }
        assert_eq!(Glyph::Decimal.token(), "decimal");
        assert_eq!(Glyph::Empty.token(), "empty");
        assert_eq!(Glyph::Digit(11).token(), "empty");
    }

    #[test]
    fn test_glyph_asset_names() {
        assert_eq!(Glyph::Digit(4).asset_name(AssetLayer::Body), "output-digit-4-b");
        assert_eq!(
            Glyph::Decimal.asset_name(AssetLayer::Detail),
            "output-digit-decimal-d"
        );
    }

    #[test]
    fn test_glyph_serializes_as_token() {
        let json = serde_json::to_string(&vec![Glyph::Digit(1), Glyph::Decimal, Glyph::Empty]).unwrap();
        assert_eq!(json, r#"["1","decimal","empty"]"#);
    }

    // ===== OperatorIndicator =====

    #[test]
    fn test_indicator_tokens() {
        assert_eq!(OperatorIndicator::default().token(), "empty");
        assert_eq!(OperatorIndicator::new(Some(Operator::Divide)).token(), "divide");
        assert_eq!(
            OperatorIndicator::new(Some(Operator::Add)).asset_name(AssetLayer::Body),
            "output-function-add-b"
        );
    }

    // ===== Formatting =====

    #[test]
    fn test_single_digit_is_right_aligned() {
        let glyphs = DisplayFormatter::new().format_digits(&accumulator_showing("5"));
        assert_eq!(glyphs.len(), 9);
        assert!(glyphs[..8].iter().all(|g| *g == Glyph::Empty));
        assert_eq!(glyphs[8], Glyph::Digit(5));
    }

    #[test]
    fn test_cleared_display_shows_zero() {
        let glyphs = DisplayFormatter::new().format_digits(&Accumulator::new());
        assert_eq!(glyphs[8], Glyph::Digit(0));
    }

    #[test]
    fn test_decimal_value_tokens() {
        let glyphs = DisplayFormatter::new().format_digits(&accumulator_showing("12.57"));
        assert_eq!(
            tokens(&glyphs),
            ["empty", "empty", "empty", "empty", "1", "2", "decimal", "5", "7"]
        );
    }

    #[test]
    fn test_trailing_point_zero_is_stripped() {
        let formatter = DisplayFormatter::new();
        assert_eq!(formatter.render_value("5.0".parse().unwrap()), "5");
        assert_eq!(formatter.render_value("5.00".parse().unwrap()), "5.00");
        assert_eq!(formatter.render_value("10.5".parse().unwrap()), "10.5");
    }

    #[test]
    fn test_long_fraction_is_cut() {
        let acc = accumulator_showing("1/3=");
        let frame = DisplayFormatter::new().frame(&acc);
        assert_eq!(frame.text(), "0.3333333");
    }

    #[test]
    fn test_dangling_point_is_dropped() {
        let formatter = DisplayFormatter::new();
        assert_eq!(formatter.render_value("12345678.9".parse().unwrap()), "12345678");
        let glyphs = formatter.format_digits(&accumulator_showing("12345678.9"));
        assert_eq!(glyphs[0], Glyph::Empty);
        assert_eq!(glyphs[8], Glyph::Digit(8));
    }

    #[test]
    fn test_overflow_blanks_every_cell() {
        let acc = accumulator_showing("1000000000=");
        let frame = DisplayFormatter::new().frame(&acc);
        assert!(frame.overflow);
        assert!(frame.digits.iter().all(|g| *g == Glyph::Empty));
        assert_eq!(frame.digits.len(), 9);
    }

    #[test]
    fn test_negative_sign_renders_blank() {
        let acc = accumulator_showing("3-8=");
        let frame = DisplayFormatter::new().frame(&acc);
        assert!(frame.negative);
        assert_eq!(frame.text(), "        5");
        assert_eq!(frame.digits[7], Glyph::Empty);
    }

    #[test]
    fn test_custom_width() {
        let formatter = DisplayFormatter::with_width(4);
        let glyphs = formatter.format_digits(&accumulator_showing("42"));
        assert_eq!(tokens(&glyphs), ["empty", "empty", "4", "2"]);
    }

    // ===== Frame =====

    #[test]
    fn test_frame_shows_pending_operator() {
        let frame = DisplayFormatter::new().frame(&accumulator_showing("7+"));
        assert_eq!(frame.operator.operator(), Some(Operator::Add));
        assert_eq!(frame.text(), "        7");
    }

    #[test]
    fn test_frame_asset_names_in_draw_order() {
        let frame = DisplayFormatter::with_width(2).frame(&accumulator_showing("7+"));
        assert_eq!(
            frame.asset_names(),
            [
                "output-function-add-b",
                "output-function-add-d",
                "output-digit-empty-b",
                "output-digit-empty-d",
                "output-digit-7-b",
                "output-digit-7-d",
                "output-endcap-d",
            ]
        );
    }

    #[test]
    fn test_frame_json() {
        let frame = DisplayFormatter::with_width(3).frame(&accumulator_showing("1.5"));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "operator": "empty",
                "digits": ["1", "decimal", "5"],
                "negative": false,
                "overflow": false
            })
        );
    }
}
