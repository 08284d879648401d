// ABOUTME: Renders a classified cell value as a SQL literal for INSERT statements
// ABOUTME: Pure functions; every per-category quoting and formatting rule lives here

use super::category::ValueCategory;
use super::value::RawValue;
use crate::error::ConversionError;
use std::borrow::Cow;
use std::fmt::Write;

/// SQL keyword emitted for null cells, independent of category
pub const NULL_LITERAL: &str = "NULL";

/// Render a cell value as a SQL literal
///
/// Null values render as `NULL` whatever the category. The rules per category:
/// - Integer / Float: raw bytes verbatim, else the native number in base 10
///   (floats in fixed notation, never scientific)
/// - Decimal: the value's default string conversion, unquoted
/// - Date: `'YYYY-MM-DD'`; DateTime / Timestamp: `'YYYY-MM-DD HH:MM:SS'`
/// - Time: `'<bytes>'`; Year: `<bytes>` unquoted
/// - Text: single-quoted with every `'` doubled
/// - Binary: `0x` followed by uppercase hex
/// - EnumOrSet / Json: single-quoted, not escaped
/// - Boolean: `true` / `false`, from a native bool or exactly 0 / 1
///
/// # Errors
///
/// Returns [`ConversionError`] when the value's representation cannot satisfy
/// its category, e.g. a Date column whose value is not temporal, a Boolean
/// column holding 5, or bytes that are not valid UTF-8 in a textual category.
///
/// # Examples
///
/// ```
/// # use mysql_sqldump::dump::{render, RawValue, ValueCategory};
/// assert_eq!(render(ValueCategory::Text, &"O'Brien".into()).unwrap(), "'O''Brien'");
/// assert_eq!(render(ValueCategory::Binary, &RawValue::Bytes(vec![0xde, 0xad])).unwrap(), "0xDEAD");
/// assert_eq!(render(ValueCategory::Boolean, &RawValue::Bool(false)).unwrap(), "false");
/// ```
pub fn render(category: ValueCategory, value: &RawValue) -> Result<String, ConversionError> {
    if value.is_null() {
        return Ok(NULL_LITERAL.to_string());
    }

    let mismatch = |expected: &'static str| ConversionError {
        category,
        expected,
        found: value.kind(),
    };

    let literal = match category {
        ValueCategory::Integer => match value {
            RawValue::Bytes(_) => text(value, mismatch)?.into_owned(),
            RawValue::Int(v) => v.to_string(),
            RawValue::UInt(v) => v.to_string(),
            _ => return Err(mismatch("an integer or raw digits")),
        },
        ValueCategory::Float => match value {
            RawValue::Bytes(_) => text(value, mismatch)?.into_owned(),
            RawValue::Float(v) if v.is_finite() => v.to_string(),
            RawValue::Int(v) => v.to_string(),
            RawValue::UInt(v) => v.to_string(),
            _ => return Err(mismatch("a finite number or raw digits")),
        },
        ValueCategory::Decimal => text(value, mismatch)?.into_owned(),
        ValueCategory::Date => match value {
            RawValue::Temporal(t) => t.format("'%Y-%m-%d'").to_string(),
            _ => return Err(mismatch("a temporal value")),
        },
        ValueCategory::DateTime | ValueCategory::Timestamp => match value {
            RawValue::Temporal(t) => t.format("'%Y-%m-%d %H:%M:%S'").to_string(),
            _ => return Err(mismatch("a temporal value")),
        },
        ValueCategory::Time => match value {
            RawValue::Bytes(_) => format!("'{}'", text(value, mismatch)?),
            _ => return Err(mismatch("raw bytes")),
        },
        ValueCategory::Year => match value {
            RawValue::Bytes(_) => text(value, mismatch)?.into_owned(),
            _ => return Err(mismatch("raw bytes")),
        },
        ValueCategory::Text => quote_escaped(&text(value, mismatch)?),
        ValueCategory::Binary => match value {
            RawValue::Bytes(bytes) => hex_literal(bytes),
            _ => return Err(mismatch("raw bytes")),
        },
        // Not escaped: output must stay byte-compatible with existing dumps.
        ValueCategory::EnumOrSet | ValueCategory::Json => format!("'{}'", text(value, mismatch)?),
        ValueCategory::Boolean => {
            if as_bool(value).ok_or_else(|| mismatch("a boolean"))? {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
    };

    Ok(literal)
}

/// Wrap in single quotes, doubling every embedded single quote
///
/// No other escaping is applied; backslashes and control characters pass through.
pub fn quote_escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// `0x` followed by the uppercase hex encoding of the bytes
pub fn hex_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

/// The value as text, refusing bytes that are not valid UTF-8
fn text<F>(value: &RawValue, mismatch: F) -> Result<Cow<'_, str>, ConversionError>
where
    F: Fn(&'static str) -> ConversionError,
{
    match value {
        RawValue::Bytes(bytes) => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| mismatch("valid UTF-8")),
        other => Ok(other.to_text()),
    }
}

/// Only a native bool or exactly 0 / 1 is a boolean
fn as_bool(value: &RawValue) -> Option<bool> {
    let number = match value {
        RawValue::Bool(b) => return Some(*b),
        RawValue::Int(v) => i128::from(*v),
        RawValue::UInt(v) => i128::from(*v),
        RawValue::Bytes(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok()?,
        _ => return None,
    };

    match number {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> RawValue {
        RawValue::Temporal(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(hh, mm, ss)
                .unwrap(),
        )
    }

    const ALL_CATEGORIES: [ValueCategory; 13] = [
        ValueCategory::Integer,
        ValueCategory::Float,
        ValueCategory::Decimal,
        ValueCategory::Date,
        ValueCategory::DateTime,
        ValueCategory::Timestamp,
        ValueCategory::Time,
        ValueCategory::Year,
        ValueCategory::Text,
        ValueCategory::Binary,
        ValueCategory::EnumOrSet,
        ValueCategory::Boolean,
        ValueCategory::Json,
    ];

    #[test]
    fn test_null_is_category_independent() {
        for category in ALL_CATEGORIES {
            assert_eq!(render(category, &RawValue::Null).unwrap(), "NULL");
        }
    }

    #[test]
    fn test_integer_native_and_bytes_agree() {
        let cases: [(RawValue, RawValue); 3] = [
            (RawValue::Int(42), "42".into()),
            (RawValue::Int(i64::MIN), i64::MIN.to_string().into()),
            (RawValue::UInt(u64::MAX), "18446744073709551615".into()),
        ];
        for (native, bytes) in cases {
            assert_eq!(
                render(ValueCategory::Integer, &native).unwrap(),
                render(ValueCategory::Integer, &bytes).unwrap()
            );
        }
    }

    #[test]
    fn test_float_native_and_bytes_agree() {
        let cases = [
            (1.5f64, "1.5"),
            (-0.25, "-0.25"),
            (3.0, "3"),
            (1e20, "100000000000000000000"),
        ];
        for (native, text) in cases {
            assert_eq!(render(ValueCategory::Float, &RawValue::Float(native)).unwrap(), text);
            assert_eq!(render(ValueCategory::Float, &text.into()).unwrap(), text);
        }
    }

    #[test]
    fn test_float_never_scientific() {
        let rendered = render(ValueCategory::Float, &RawValue::Float(1.5e-7)).unwrap();
        assert_eq!(rendered, "0.00000015");
        assert!(!rendered.contains('e'));
    }

    #[test]
    fn test_float_rejects_non_finite() {
        assert!(render(ValueCategory::Float, &RawValue::Float(f64::NAN)).is_err());
        assert!(render(ValueCategory::Float, &RawValue::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_decimal_keeps_scale() {
        assert_eq!(render(ValueCategory::Decimal, &"10.500".into()).unwrap(), "10.500");
    }

    #[test]
    fn test_temporal_formats() {
        let t = timestamp(2023, 1, 9, 7, 3, 2);
        assert_eq!(render(ValueCategory::Date, &t).unwrap(), "'2023-01-09'");
        assert_eq!(render(ValueCategory::DateTime, &t).unwrap(), "'2023-01-09 07:03:02'");
        assert_eq!(render(ValueCategory::Timestamp, &t).unwrap(), "'2023-01-09 07:03:02'");
    }

    #[test]
    fn test_date_requires_temporal() {
        let err = render(ValueCategory::Date, &"2023-01-09".into()).unwrap_err();
        assert_eq!(err.category, ValueCategory::Date);
        assert_eq!(err.found, "bytes");
        assert!(render(ValueCategory::Timestamp, &RawValue::Int(0)).is_err());
    }

    #[test]
    fn test_time_and_year_use_raw_bytes() {
        assert_eq!(render(ValueCategory::Time, &"-838:59:59".into()).unwrap(), "'-838:59:59'");
        assert_eq!(render(ValueCategory::Year, &"2024".into()).unwrap(), "2024");
        assert!(render(ValueCategory::Time, &timestamp(2024, 1, 1, 0, 0, 0)).is_err());
        assert!(render(ValueCategory::Year, &RawValue::Int(2024)).is_err());
    }

    #[test]
    fn test_text_doubles_quotes_only() {
        assert_eq!(render(ValueCategory::Text, &"O'Brien".into()).unwrap(), "'O''Brien'");
        assert_eq!(render(ValueCategory::Text, &"''".into()).unwrap(), "''''''");
        assert_eq!(render(ValueCategory::Text, &"a\\b\nc".into()).unwrap(), "'a\\b\nc'");
    }

    #[test]
    fn test_text_quotes_are_always_doubled() {
        for s in ["", "'", "it's", "'lead", "trail'", "a''b", "日本'語"] {
            let rendered = render(ValueCategory::Text, &s.into()).unwrap();
            let inner = &rendered[1..rendered.len() - 1];
            assert_eq!(inner.replace("''", ""), s.replace('\'', ""), "input {:?}", s);
            assert_eq!(inner.matches('\'').count(), s.matches('\'').count() * 2);
        }
    }

    #[test]
    fn test_binary_is_uppercase_hex() {
        assert_eq!(render(ValueCategory::Binary, &RawValue::Bytes(vec![])).unwrap(), "0x");
        assert_eq!(
            render(ValueCategory::Binary, &RawValue::Bytes(vec![0x00, 0xab, 0x7f])).unwrap(),
            "0x00AB7F"
        );
        assert!(render(ValueCategory::Binary, &RawValue::Int(1)).is_err());
    }

    #[test]
    fn test_enum_and_json_are_not_escaped() {
        assert_eq!(render(ValueCategory::EnumOrSet, &"a,b".into()).unwrap(), "'a,b'");
        assert_eq!(
            render(ValueCategory::Json, &r#"{"k": "it's"}"#.into()).unwrap(),
            r#"'{"k": "it's"}'"#
        );
    }

    #[test]
    fn test_boolean_keywords() {
        assert_eq!(render(ValueCategory::Boolean, &RawValue::Bool(true)).unwrap(), "true");
        assert_eq!(render(ValueCategory::Boolean, &RawValue::Bool(false)).unwrap(), "false");
        assert_eq!(render(ValueCategory::Boolean, &RawValue::Int(1)).unwrap(), "true");
        assert_eq!(render(ValueCategory::Boolean, &"0".into()).unwrap(), "false");
        assert!(render(ValueCategory::Boolean, &"yes".into()).is_err());
    }

    #[test]
    fn test_boolean_rejects_values_other_than_zero_and_one() {
        let wide: [RawValue; 5] = [
            RawValue::Int(5),
            RawValue::Int(-1),
            RawValue::UInt(200),
            "200".into(),
            "-1".into(),
        ];
        for value in wide {
            let err = render(ValueCategory::Boolean, &value).unwrap_err();
            assert_eq!(err.category, ValueCategory::Boolean, "value {:?}", value);
        }
        assert_eq!(render(ValueCategory::Boolean, &RawValue::UInt(1)).unwrap(), "true");
        assert_eq!(render(ValueCategory::Boolean, &" 1".into()).unwrap(), "true");
    }

    #[test]
    fn test_invalid_utf8_is_rejected_not_replaced() {
        let invalid = RawValue::Bytes(vec![b'a', 0xff, b'b']);
        for category in [
            ValueCategory::Text,
            ValueCategory::Decimal,
            ValueCategory::Time,
            ValueCategory::Year,
            ValueCategory::EnumOrSet,
            ValueCategory::Json,
            ValueCategory::Integer,
        ] {
            let err = render(category, &invalid).unwrap_err();
            assert_eq!(err.expected, "valid UTF-8", "category {}", category);
            assert_eq!(err.found, "bytes");
        }
        // Binary columns keep every byte
        assert_eq!(render(ValueCategory::Binary, &invalid).unwrap(), "0x61FF62");
    }
}
