//! Value formatting
//!
//! Type-directed normalisation of literals, shared by both backends. A
//! literal is first checked against the field's declared type and turned
//! into a `FormattedValue`; each backend then decides the punctuation
//! (inline literal or bound parameter).

use crate::error::{CompileError, Result};
use segfilter_core::types::{DataType, Literal};

const NOW_TOKEN: &str = "now()";

/// A literal validated against its field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedValue {
    Null,
    Bool(bool),
    /// Canonical number text: integers without a decimal point, decimals as written
    Number(String),
    /// Raw, unescaped text
    Text(String),
    /// The `now()` function token
    Now,
}

/// Value formatter
pub struct ValueFormatter;

impl ValueFormatter {
    /// Validate `value` against `dtype`
    pub fn normalize(value: &Literal, dtype: DataType) -> Result<FormattedValue> {
        if value.is_null() {
            return Ok(FormattedValue::Null);
        }

        match dtype {
            DataType::Int | DataType::Float => Self::normalize_number(value, dtype).map(FormattedValue::Number),
            DataType::Boolean => Self::normalize_bool(value).map(FormattedValue::Bool),
            DataType::Datetime => match value {
                Literal::String(s) if s.trim().eq_ignore_ascii_case(NOW_TOKEN) => Ok(FormattedValue::Now),
                Literal::String(s) => Ok(FormattedValue::Text(s.clone())),
                other => Err(CompileError::invalid_value(
                    other,
                    "datetime (expected 'now()' or ISO string)",
                )),
            },
            DataType::String => match value {
                Literal::String(s) => Ok(FormattedValue::Text(s.clone())),
                Literal::Number(n) => Ok(FormattedValue::Text(n.to_string())),
                Literal::Bool(b) => Ok(FormattedValue::Text(b.to_string())),
                Literal::Null => Ok(FormattedValue::Null),
            },
        }
    }

    fn normalize_number(value: &Literal, dtype: DataType) -> Result<String> {
        let invalid = || CompileError::invalid_value(value, format!("number for type {}", dtype));

        match value {
            Literal::Number(n) => Ok(n.to_string()),
            Literal::String(s) => {
                let text = s.trim();
                let plain = !text.is_empty()
                    && text
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
                if !plain {
                    return Err(invalid());
                }

                if text.contains('.') {
                    match text.parse::<f64>() {
                        Ok(f) if f.is_finite() => Ok(text.to_string()),
                        _ => Err(invalid()),
                    }
                } else {
                    Self::normalize_integer(text).ok_or_else(invalid)
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Canonical integer text of any length: sign kept, leading zeros dropped
    fn normalize_integer(text: &str) -> Option<String> {
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = digits.trim_start_matches('0');
        Some(match (digits.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", digits),
            (false, false) => digits.to_string(),
        })
    }

    fn normalize_bool(value: &Literal) -> Result<bool> {
        match value {
            Literal::Bool(b) => Ok(*b),
            Literal::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(CompileError::invalid_value(value, "boolean")),
            },
            _ => Err(CompileError::invalid_value(value, "boolean")),
        }
    }

    /// Double-quoted string constant with `\` and `"` backslash-escaped
    pub fn quote_string(s: &str) -> String {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }

    /// Single-quoted property name with `\` and `'` backslash-escaped
    pub fn quote_property(name: &str) -> String {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(value: impl Into<Literal>, dtype: DataType) -> Result<FormattedValue> {
        ValueFormatter::normalize(&value.into(), dtype)
    }

    #[test]
    fn test_native_numbers() {
        assert_eq!(norm(500, DataType::Float).unwrap(), FormattedValue::Number("500".to_string()));
        assert_eq!(norm(4.5, DataType::Float).unwrap(), FormattedValue::Number("4.5".to_string()));
        assert_eq!(norm(-3, DataType::Int).unwrap(), FormattedValue::Number("-3".to_string()));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(norm("42", DataType::Int).unwrap(), FormattedValue::Number("42".to_string()));
        assert_eq!(norm(" 007 ", DataType::Int).unwrap(), FormattedValue::Number("7".to_string()));
        assert_eq!(norm("19.90", DataType::Float).unwrap(), FormattedValue::Number("19.90".to_string()));
        assert_eq!(norm("1.5e3", DataType::Float).unwrap(), FormattedValue::Number("1.5e3".to_string()));
    }

    #[test]
    fn test_integer_strings_of_any_length() {
        let long = "123456789012345678901234567890123456789012345678901";
        assert_eq!(norm(long, DataType::Int).unwrap(), FormattedValue::Number(long.to_string()));
        assert_eq!(
            norm(format!("-000{}", long), DataType::Int).unwrap(),
            FormattedValue::Number(format!("-{}", long))
        );
        assert_eq!(norm("-007", DataType::Int).unwrap(), FormattedValue::Number("-7".to_string()));
        assert_eq!(norm("+42", DataType::Float).unwrap(), FormattedValue::Number("42".to_string()));
        assert_eq!(norm("-000", DataType::Int).unwrap(), FormattedValue::Number("0".to_string()));
    }

    #[test]
    fn test_invalid_numbers() {
        for bad in ["abc", "", "1e5", "NaN", "inf.0", "1 OR 1", "12abc", "-", "+-1", "1-2"] {
            let err = norm(bad, DataType::Int).unwrap_err();
            assert!(
                matches!(err, CompileError::InvalidValue { .. }),
                "expected InvalidValue for {:?}",
                bad
            );
        }
        let err = norm(true, DataType::Float).unwrap_err();
        assert!(err.to_string().contains("number for type float"));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(norm(true, DataType::Boolean).unwrap(), FormattedValue::Bool(true));
        assert_eq!(norm(" FALSE ", DataType::Boolean).unwrap(), FormattedValue::Bool(false));
        assert_eq!(norm("True", DataType::Boolean).unwrap(), FormattedValue::Bool(true));
        assert!(norm("yes", DataType::Boolean).is_err());
        assert!(norm(1, DataType::Boolean).is_err());
    }

    #[test]
    fn test_datetime() {
        assert_eq!(norm("NOW()", DataType::Datetime).unwrap(), FormattedValue::Now);
        assert_eq!(
            norm("2025-08-09T00:00:00Z", DataType::Datetime).unwrap(),
            FormattedValue::Text("2025-08-09T00:00:00Z".to_string())
        );
        let err = norm(1700000000, DataType::Datetime).unwrap_err();
        assert!(err.to_string().contains("expected 'now()' or ISO string"));
    }

    #[test]
    fn test_strings_stringify_scalars() {
        assert_eq!(norm("Books", DataType::String).unwrap(), FormattedValue::Text("Books".to_string()));
        assert_eq!(norm(42, DataType::String).unwrap(), FormattedValue::Text("42".to_string()));
        assert_eq!(norm(false, DataType::String).unwrap(), FormattedValue::Text("false".to_string()));
    }

    #[test]
    fn test_null_for_any_type() {
        for dtype in DataType::ALL {
            assert_eq!(ValueFormatter::normalize(&Literal::Null, dtype).unwrap(), FormattedValue::Null);
        }
    }

    #[test]
    fn test_quoting() {
        assert_eq!(ValueFormatter::quote_string("Books"), "\"Books\"");
        assert_eq!(
            ValueFormatter::quote_string(r#"a"b\c"#),
            r#""a\"b\\c""#
        );
        assert_eq!(ValueFormatter::quote_property("price"), "'price'");
        assert_eq!(ValueFormatter::quote_property("it's"), r"'it\'s'");
    }
}
