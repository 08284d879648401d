// ABOUTME: Classifies engine-reported column type names into value categories
// ABOUTME: One lookup per column, so rendering never re-inspects type strings

use crate::error::DumpError;
use std::fmt;

/// Semantic class of a column that drives how its values become SQL literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    Integer,
    Float,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    Text,
    Binary,
    EnumOrSet,
    Boolean,
    Json,
}

impl ValueCategory {
    /// Canonical label used in logs and error messages
    pub fn label(self) -> &'static str {
        match self {
            ValueCategory::Integer => "INTEGER",
            ValueCategory::Float => "FLOAT",
            ValueCategory::Decimal => "DECIMAL",
            ValueCategory::Date => "DATE",
            ValueCategory::DateTime => "DATETIME",
            ValueCategory::Timestamp => "TIMESTAMP",
            ValueCategory::Time => "TIME",
            ValueCategory::Year => "YEAR",
            ValueCategory::Text => "TEXT",
            ValueCategory::Binary => "BINARY",
            ValueCategory::EnumOrSet => "ENUM/SET",
            ValueCategory::Boolean => "BOOLEAN",
            ValueCategory::Json => "JSON",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualifiers MySQL appends to numeric type names that do not change rendering
const IGNORED_QUALIFIERS: &[&str] = &["UNSIGNED", "ZEROFILL"];

/// Strip sign/fill qualifiers and all whitespace from a reported type name
///
/// # Examples
///
/// ```
/// # use mysql_sqldump::dump::category::normalize_type_name;
/// assert_eq!(normalize_type_name("BIGINT UNSIGNED"), "BIGINT");
/// assert_eq!(normalize_type_name("int unsigned zerofill"), "INT");
/// assert_eq!(normalize_type_name(" VARCHAR "), "VARCHAR");
/// ```
pub fn normalize_type_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    for qualifier in IGNORED_QUALIFIERS {
        name = name.replace(qualifier, "");
    }

    name
}

/// Map a reported column type name to its value category
///
/// # Errors
///
/// Returns [`DumpError::UnsupportedType`] when the normalized name has no
/// rendering rule. Callers must abort the table dump rather than drop the column.
///
/// # Examples
///
/// ```
/// # use mysql_sqldump::dump::category::{classify, ValueCategory};
/// assert_eq!(classify("INT UNSIGNED").unwrap(), ValueCategory::Integer);
/// assert_eq!(classify("LONGBLOB").unwrap(), ValueCategory::Binary);
/// assert!(classify("GEOMETRY").is_err());
/// ```
pub fn classify(raw: &str) -> Result<ValueCategory, DumpError> {
    let name = normalize_type_name(raw);

    let category = match name.as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" => {
            ValueCategory::Integer
        }
        "FLOAT" | "DOUBLE" => ValueCategory::Float,
        "DECIMAL" | "DEC" => ValueCategory::Decimal,
        "DATE" => ValueCategory::Date,
        "DATETIME" => ValueCategory::DateTime,
        "TIMESTAMP" => ValueCategory::Timestamp,
        "TIME" => ValueCategory::Time,
        "YEAR" => ValueCategory::Year,
        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" => {
            ValueCategory::Text
        }
        "BIT" | "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            ValueCategory::Binary
        }
        "ENUM" | "SET" => ValueCategory::EnumOrSet,
        "BOOL" | "BOOLEAN" => ValueCategory::Boolean,
        "JSON" => ValueCategory::Json,
        _ => return Err(DumpError::UnsupportedType { type_name: name }),
    };

    Ok(category)
}
