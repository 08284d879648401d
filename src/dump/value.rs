// ABOUTME: Column descriptors and driver cell values at the source boundary
// ABOUTME: Models the native-versus-raw-bytes ambiguity drivers expose

use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Name and engine-reported type of one result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_name: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A single cell as surfaced by the driver
///
/// The same logical value can arrive in more than one shape: an unsigned
/// BIGINT beyond `i64::MAX` comes back as digit bytes while smaller integers
/// come back natively. Rendering must accept both.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Temporal(NaiveDateTime),
    Bool(bool),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Short description of the representation, used in conversion errors
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Int(_) => "signed integer",
            RawValue::UInt(_) => "unsigned integer",
            RawValue::Float(_) => "float",
            RawValue::Bytes(_) => "bytes",
            RawValue::Temporal(_) => "temporal value",
            RawValue::Bool(_) => "boolean",
        }
    }

    /// Default string conversion of the value
    ///
    /// Bytes are decoded as UTF-8, replacing invalid sequences with U+FFFD, so
    /// this is for display and error messages. The literal renderer checks
    /// UTF-8 validity itself and refuses to dump replaced bytes.
    /// Temporals use `YYYY-MM-DD HH:MM:SS`.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Null => Cow::Borrowed("NULL"),
            RawValue::Int(v) => Cow::Owned(v.to_string()),
            RawValue::UInt(v) => Cow::Owned(v.to_string()),
            RawValue::Float(v) => Cow::Owned(v.to_string()),
            RawValue::Bytes(bytes) => String::from_utf8_lossy(bytes),
            RawValue::Temporal(t) => Cow::Owned(t.format("%Y-%m-%d %H:%M:%S").to_string()),
            RawValue::Bool(true) => Cow::Borrowed("1"),
            RawValue::Bool(false) => Cow::Borrowed("0"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Bytes(value.into_bytes())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::Temporal(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}
