//! Money / percent parsing from normalized numeric tags.
//!
//! Input is the `NormalizedNamedEntityTag` the tagger leaves on a numeric
//! entity head, e.g. `$1900000.0`, `%2.5` or `>=41.0`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::model::Value;
use crate::{Error, Result};

static MONEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\$¥£])(\d+\.\d+(E-?\d+)?)$").expect("hard-coded pattern"));
static PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%(\d+\.\d+(E-?\d+)?)$").expect("hard-coded pattern"));

/// Strip a comparison prefix off a normalized value, returning the wrapper
/// concept it encodes. `>=41.0` → (`at-least`, `41.0`). A bare prefix with
/// nothing behind it is only warned about and passed through.
pub fn split_comparison(normalized: &str) -> (Option<&'static str>, &str) {
    let mut chars = normalized.chars();
    let first = chars.next();
    let second = chars.next();
    match (first, second) {
        (Some('<' | '>' | '~'), None) => {
            warn!(value = normalized, "unexpected bare comparison in normalized tag");
            (None, normalized)
        }
        (Some(op), Some('=')) if matches!(op, '<' | '>' | '~') => {
            let concept = match op {
                '<' => "no-more-than",
                '>' => "at-least",
                _ => "about",
            };
            (Some(concept), &normalized[2..])
        }
        (Some(op @ ('<' | '>' | '~')), Some(_)) => {
            let concept = match op {
                '<' => "less-than",
                '>' => "more-than",
                _ => "about",
            };
            (Some(concept), &normalized[1..])
        }
        _ => (None, normalized),
    }
}

/// Parse a numeric string, collapsing integral values to `Int`. A
/// non-numeric string stays a string literal, as the tagger sometimes
/// normalizes cardinals to non-numbers.
pub fn numeric_value(s: &str) -> Value {
    match s.parse::<f64>() {
        Ok(f) => Value::number(f),
        Err(_) => Value::String(s.to_string()),
    }
}

/// Parse a normalized money value into its unit concept and magnitude.
pub fn parse_money(normalized: &str) -> Result<(&'static str, Value)> {
    let captures = MONEY
        .captures(normalized)
        .ok_or_else(|| Error::UnrecognizedAnnotation(format!("MONEY value {normalized:?}")))?;
    let unit = match &captures[1] {
        "$" => "dollar",
        "¥" => "yen",
        _ => "pound",
    };
    Ok((unit, numeric_value(&captures[2])))
}

/// Parse a normalized percent value into its magnitude.
pub fn parse_percent(normalized: &str) -> Result<Value> {
    let captures = PERCENT
        .captures(normalized)
        .ok_or_else(|| Error::UnrecognizedAnnotation(format!("PERCENT value {normalized:?}")))?;
    Ok(numeric_value(&captures[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        let (unit, value) = parse_money("$1900000.0").unwrap();
        assert_eq!(unit, "dollar");
        assert_eq!(value, Value::Int(1_900_000));

        let (unit, value) = parse_money("¥2.5").unwrap();
        assert_eq!(unit, "yen");
        assert_eq!(value, Value::Float(2.5));
    }

    #[test]
    fn test_money_scientific_notation() {
        let (_, value) = parse_money("$1.9E6").unwrap();
        assert_eq!(value, Value::Int(1_900_000));
    }

    #[test]
    fn test_money_rejects_garbage() {
        assert!(parse_money("1900000.0").is_err());
        assert!(parse_money("$three").is_err());
    }

    #[test]
    fn test_percent() {
        assert_eq!(parse_percent("%6.5").unwrap(), Value::Float(6.5));
        assert_eq!(parse_percent("%10.0").unwrap(), Value::Int(10));
        assert!(parse_percent("6.5").is_err());
    }

    #[test]
    fn test_split_comparison() {
        assert_eq!(split_comparison(">41.0"), (Some("more-than"), "41.0"));
        assert_eq!(split_comparison("<41.0"), (Some("less-than"), "41.0"));
        assert_eq!(split_comparison(">=41.0"), (Some("at-least"), "41.0"));
        assert_eq!(split_comparison("<=41.0"), (Some("no-more-than"), "41.0"));
        assert_eq!(split_comparison("~3.0"), (Some("about"), "3.0"));
        assert_eq!(split_comparison("41.0"), (None, "41.0"));
        assert_eq!(split_comparison(">"), (None, ">"));
    }

    #[test]
    fn test_numeric_value_keeps_non_numbers() {
        assert_eq!(numeric_value("dozens"), Value::String("dozens".into()));
    }
}
