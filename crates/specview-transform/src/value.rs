//! Typed interpretation of spec cell values.
//!
//! Cells arrive as text. The column type decides how two cells compare when
//! they take part in a group key:
//!
//! - `LOV` / `text`: exact (trimmed) text
//! - `number`: leading decimal plus optional unit, `"24 V"` == `"24.0 V"`.
//!   Keys are built from the decimal digits, so equality is exact at any precision
//! - `range`: `"min-max"` plus optional unit, interval equality
//! - `logical`: recognised truthy/falsy tokens
//!
//! Text that does not parse for its type keeps its raw value as an
//! [`KeyPart::Unparsed`] key so it forms its own group.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use specview_model::{CellValue, ColumnType};

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)(.*)$").expect("Invalid number regex")
});

static RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)(.*)$").expect("Invalid range regex")
});

const TRUTHY: &[&str] = &["true", "yes", "y", "1", "on"];
const FALSY: &[&str] = &["false", "no", "n", "0", "off"];

/// A parsed number. `value` is for bounds checks, `decimal` for equality.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub decimal: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    pub low: f64,
    pub high: f64,
    pub low_decimal: String,
    pub high_decimal: String,
    pub unit: Option<String>,
}

impl RangeValue {
    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        self.high >= min && self.low <= max
    }
}

fn unit_of(rest: &str) -> Option<String> {
    let unit = rest.trim();
    if unit.is_empty() {
        None
    } else {
        Some(unit.to_string())
    }
}

/// Parses `"12.5"`, `"24 V"`, `"-10 °C"`.
///
/// A remainder that starts with another digit group (`"10-30 V"`) is not a
/// unit, so ranges are not mistaken for numbers.
pub fn parse_number(raw: &str) -> Option<NumberValue> {
    let caps = NUMBER_REGEX.captures(raw)?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    if RANGE_REGEX.is_match(raw) {
        return None;
    }
    let digits = caps.get(1)?.as_str();
    Some(NumberValue {
        value: digits.parse::<f64>().ok()?,
        decimal: canonical_decimal(digits),
        unit: unit_of(rest),
    })
}

/// Parses `"10-30"`, `"10 - 30 VDC"`, `"-25-55 °C"`. Bounds are ordered low to high.
pub fn parse_range(raw: &str) -> Option<RangeValue> {
    let caps = RANGE_REGEX.captures(raw)?;
    let first = caps.get(1)?.as_str();
    let second = caps.get(2)?.as_str();
    let (first_decimal, second_decimal) = (canonical_decimal(first), canonical_decimal(second));
    let (low, high, low_decimal, high_decimal) =
        if compare_decimal(&first_decimal, &second_decimal) == Ordering::Greater {
            (second, first, second_decimal, first_decimal)
        } else {
            (first, second, first_decimal, second_decimal)
        };
    Some(RangeValue {
        low: low.parse::<f64>().ok()?,
        high: high.parse::<f64>().ok()?,
        low_decimal,
        high_decimal,
        unit: unit_of(caps.get(3).map_or("", |m| m.as_str())),
    })
}

pub fn parse_logical(raw: &str) -> Option<bool> {
    let token = raw.trim().to_lowercase();
    if TRUTHY.contains(&token.as_str()) {
        Some(true)
    } else if FALSY.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Canonical text of a matched decimal: `007.50` becomes `7.5`, `-0.0` becomes `0`.
pub(crate) fn canonical_decimal(digits: &str) -> String {
    let (negative, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');
    if int_part.is_empty() && frac_part.is_empty() {
        return "0".to_string();
    }
    let mut out = String::with_capacity(digits.len() + 1);
    if negative {
        out.push('-');
    }
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Orders two canonical decimals without going through floating point.
fn compare_decimal(a: &str, b: &str) -> Ordering {
    match (a.strip_prefix('-'), b.strip_prefix('-')) {
        (Some(a), Some(b)) => compare_magnitude(b, a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_magnitude(a, b),
    }
}

fn compare_magnitude(a: &str, b: &str) -> Ordering {
    let (a_int, a_frac) = a.split_once('.').unwrap_or((a, ""));
    let (b_int, b_frac) = b.split_once('.').unwrap_or((b, ""));
    a_int
        .len()
        .cmp(&b_int.len())
        .then_with(|| a_int.cmp(b_int))
        .then_with(|| a_frac.cmp(b_frac))
}

/// One component of a group key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Missing,
    Text(String),
    Number { value: String, unit: String },
    Range { low: String, high: String, unit: String },
    Logical(bool),
    /// Text that does not parse for the column's type.
    Unparsed(String),
}

impl KeyPart {
    pub fn is_unparsed(&self) -> bool {
        matches!(self, KeyPart::Unparsed(_))
    }
}

/// Comparison key for a cell of the given column type.
pub fn key_part(column_type: ColumnType, cell: &CellValue) -> KeyPart {
    let Some(raw) = cell.as_text() else {
        return KeyPart::Missing;
    };
    match column_type {
        ColumnType::Lov | ColumnType::Text => KeyPart::Text(raw.trim().to_string()),
        ColumnType::Number => match parse_number(raw) {
            Some(number) => KeyPart::Number {
                value: number.decimal,
                unit: number.unit.unwrap_or_default(),
            },
            None => KeyPart::Unparsed(raw.to_string()),
        },
        ColumnType::Range => match parse_range(raw) {
            Some(range) => KeyPart::Range {
                low: range.low_decimal,
                high: range.high_decimal,
                unit: range.unit.unwrap_or_default(),
            },
            None => KeyPart::Unparsed(raw.to_string()),
        },
        ColumnType::Logical => match parse_logical(raw) {
            Some(flag) => KeyPart::Logical(flag),
            None => KeyPart::Unparsed(raw.to_string()),
        },
    }
}

/// Values of a multi-valued LOV cell (`"PNP;NPN"`).
pub fn lov_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> CellValue {
        CellValue::from_raw(raw)
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            key_part(ColumnType::Number, &text("24 V")),
            key_part(ColumnType::Number, &text("24.00 V"))
        );
        assert_ne!(
            key_part(ColumnType::Number, &text("24 V")),
            key_part(ColumnType::Number, &text("24 mA"))
        );
        assert_eq!(
            key_part(ColumnType::Number, &text("-0")),
            key_part(ColumnType::Number, &text("0"))
        );
    }

    #[test]
    fn canonical_decimal_trims_zeros() {
        assert_eq!(canonical_decimal("10"), "10");
        assert_eq!(canonical_decimal("1.50"), "1.5");
        assert_eq!(canonical_decimal("007.0"), "7");
        assert_eq!(canonical_decimal("0.25"), "0.25");
        assert_eq!(canonical_decimal("-0.00"), "0");
        assert_eq!(canonical_decimal("-00.5"), "-0.5");
    }

    #[test]
    fn numbers_beyond_float_precision_stay_distinct() {
        assert_ne!(
            key_part(ColumnType::Number, &text("9007199254740993")),
            key_part(ColumnType::Number, &text("9007199254740992"))
        );
        assert_ne!(
            key_part(ColumnType::Number, &text("0.1")),
            key_part(ColumnType::Number, &text("0.10000000000000000001"))
        );
    }

    #[test]
    fn decimals_order_by_value() {
        assert_eq!(compare_decimal("-5", "3"), Ordering::Less);
        assert_eq!(compare_decimal("-5", "-30"), Ordering::Greater);
        assert_eq!(compare_decimal("100", "99.9"), Ordering::Greater);
        assert_eq!(compare_decimal("0.25", "0.3"), Ordering::Less);
        assert_eq!(compare_decimal("1.5", "1.5"), Ordering::Equal);
    }

    #[test]
    fn range_is_not_a_number() {
        assert!(parse_number("10-30 VDC").is_none());
        assert!(parse_number("10 - 30").is_none());
        assert_eq!(parse_number("12-pin").map(|n| n.value), Some(12.0));
    }

    #[test]
    fn unparseable_number_is_its_own_key() {
        assert_eq!(
            key_part(ColumnType::Number, &text("approx. 5")),
            KeyPart::Unparsed("approx. 5".to_string())
        );
    }

    #[test]
    fn range_bounds_are_ordered() {
        let range = parse_range("30-10 VDC").unwrap();
        assert_eq!((range.low, range.high), (10.0, 30.0));
        assert_eq!((range.low_decimal.as_str(), range.high_decimal.as_str()), ("10", "30"));
        assert_eq!(range.unit.as_deref(), Some("VDC"));
        let negative = parse_range("-25 - 55 °C").unwrap();
        assert_eq!((negative.low, negative.high), (-25.0, 55.0));
    }

    #[test]
    fn ranges_use_interval_equality() {
        assert_eq!(
            key_part(ColumnType::Range, &text("10-30 VDC")),
            key_part(ColumnType::Range, &text("10.0 - 30 VDC"))
        );
        assert_ne!(
            key_part(ColumnType::Range, &text("10-30 VDC")),
            key_part(ColumnType::Range, &text("12-24 VDC"))
        );
    }

    #[test]
    fn logical_tokens() {
        for raw in ["Yes", "TRUE", "y", "1", "on"] {
            assert_eq!(parse_logical(raw), Some(true), "{raw}");
        }
        for raw in ["No", "false", "N", "0", "off"] {
            assert_eq!(parse_logical(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_logical("maybe"), None);
    }

    #[test]
    fn missing_cells_share_a_key() {
        assert_eq!(
            key_part(ColumnType::Lov, &CellValue::Missing),
            KeyPart::Missing
        );
    }

    #[test]
    fn lov_values_split_on_semicolon() {
        let values: Vec<&str> = lov_values("PNP; NPN;;").collect();
        assert_eq!(values, vec!["PNP", "NPN"]);
    }
}
