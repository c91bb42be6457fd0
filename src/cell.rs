// Cell Normalizer
// Turns any raw grid value into canonical trimmed text

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Cell - One raw grid position as delivered by the workbook reader
///
/// Closed set of shapes. The normalizer below is total over it, so no
/// cell can ever make extraction fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Empty position or a missing-value marker
    Absent,
    /// Integral number (also used for booleans: 0 / 1)
    Integer(i64),
    /// Floating-point number, possibly NaN
    Fraction(f64),
    /// Text exactly as stored (not trimmed)
    Text(String),
    /// Anything else, already rendered to text by the reader (dates, durations)
    Opaque(String),
}

impl Cell {
    /// Missing in the "no value at all" sense: absent or NaN.
    ///
    /// Whitespace-only text is NOT missing; it is still a text cell.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Absent => true,
            Cell::Fraction(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Raw text of a text-typed cell, untrimmed
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// True for a text cell with at least one non-whitespace character
    pub fn has_text_content(&self) -> bool {
        self.as_text().is_some_and(|text| !text.trim().is_empty())
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Fraction(value)
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Significant digits kept when rendering a non-integral number
const SIGNIFICANT_DIGITS: usize = 15;

/// Convert a cell into canonical trimmed text.
///
/// - Absent / NaN → ""
/// - Fraction with no fractional part → integer text ("1200.0" → "1200")
/// - Other fractions → up to 15 significant digits, trailing zeros stripped
/// - Integer → decimal text
/// - Text / Opaque → trimmed, inner whitespace kept
pub fn normalize(cell: &Cell) -> String {
    match cell {
        Cell::Absent => String::new(),
        Cell::Fraction(value) if value.is_nan() => String::new(),
        Cell::Fraction(value) => format_fraction(*value),
        Cell::Integer(value) => value.to_string(),
        Cell::Text(text) => text.trim().to_string(),
        Cell::Opaque(text) => text.trim().to_string(),
    }
}

/// Render a finite or infinite float the way a "%.15g" formatter would,
/// except that integral values never get an exponent.
fn format_fraction(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    if value.fract() == 0.0 {
        if value == 0.0 {
            // -0.0 renders as plain zero
            return "0".to_string();
        }
        return format!("{:.0}", value);
    }

    // Round to the target precision first; the exponent of the rounded
    // value decides between fixed and scientific notation.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
    let fixed = format!("{:.*}", decimals, value);
    strip_trailing_zeros(&fixed).to_string()
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(normalize(&Cell::Absent), "");
        assert_eq!(normalize(&Cell::Fraction(f64::NAN)), "");
    }

    #[test]
    fn test_integral_fraction_drops_decimal_point() {
        assert_eq!(normalize(&Cell::Fraction(1200.0)), "1200");
        assert_eq!(normalize(&Cell::Fraction(-3.0)), "-3");
        assert_eq!(normalize(&Cell::Fraction(-0.0)), "0");
        assert_eq!(normalize(&Cell::Fraction(11122233344.0)), "11122233344");
    }

    #[test]
    fn test_fraction_keeps_significant_digits() {
        assert_eq!(normalize(&Cell::Fraction(1234.5)), "1234.5");
        assert_eq!(normalize(&Cell::Fraction(0.1)), "0.1");
        assert_eq!(normalize(&Cell::Fraction(0.1 + 0.2)), "0.3");
        assert_eq!(normalize(&Cell::Fraction(2.0 / 3.0)), "0.666666666666667");
    }

    #[test]
    fn test_fraction_scientific_range() {
        assert_eq!(normalize(&Cell::Fraction(0.00001234)), "1.234e-05");
        assert_eq!(normalize(&Cell::Fraction(0.0001234)), "0.0001234");
        assert_eq!(normalize(&Cell::Fraction(1.5e20)), "150000000000000000000");
        assert_eq!(normalize(&Cell::Fraction(1.25e16 + 0.5)), "12500000000000000");
    }

    #[test]
    fn test_infinite_fraction() {
        assert_eq!(normalize(&Cell::Fraction(f64::INFINITY)), "inf");
        assert_eq!(normalize(&Cell::Fraction(f64::NEG_INFINITY)), "-inf");
    }

    #[test]
    fn test_integer_and_text() {
        assert_eq!(normalize(&Cell::Integer(45)), "45");
        assert_eq!(normalize(&Cell::Integer(-7)), "-7");
        assert_eq!(normalize(&Cell::from("  Maria  da Silva \t")), "Maria  da Silva");
        assert_eq!(normalize(&Cell::Opaque(" 2024-01-31 00:00:00 ".to_string())), "2024-01-31 00:00:00");
    }

    #[test]
    fn test_missing_vs_blank_text() {
        assert!(Cell::Absent.is_missing());
        assert!(Cell::Fraction(f64::NAN).is_missing());
        assert!(!Cell::from("   ").is_missing());
        assert!(!Cell::from("   ").has_text_content());
        assert!(Cell::from(" x ").has_text_content());
        assert!(!Cell::Integer(1).has_text_content());
    }
}
