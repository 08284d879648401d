// ABOUTME: Serializes result rows into complete INSERT statements
// ABOUTME: Classifies columns once per table and renders each cell through the literal renderer

use super::category::{classify, ValueCategory};
use super::literal::{render, NULL_LITERAL};
use super::value::{ColumnDescriptor, RawValue};
use crate::error::DumpError;

/// Renders every row of one table with a fixed column layout
///
/// Column classification happens once, in [`RowSerializer::new`]. An
/// unsupported column type is remembered and reported the first time a
/// non-null cell of that column needs rendering.
#[derive(Debug)]
pub struct RowSerializer {
    table: String,
    prefix: String,
    columns: Vec<ClassifiedColumn>,
}

#[derive(Debug)]
struct ClassifiedColumn {
    name: String,
    category: Result<ValueCategory, String>,
}

impl RowSerializer {
    pub fn new(table: &str, columns: &[ColumnDescriptor], ignore_duplicates: bool) -> Self {
        let verb = if ignore_duplicates {
            "INSERT IGNORE INTO"
        } else {
            "INSERT INTO"
        };

        let columns = columns
            .iter()
            .map(|column| ClassifiedColumn {
                name: column.name.clone(),
                category: classify(&column.type_name).map_err(|e| match e {
                    DumpError::UnsupportedType { type_name } => type_name,
                    other => other.to_string(),
                }),
            })
            .collect();

        Self {
            table: table.to_string(),
            prefix: format!("{} `{}` VALUES (", verb, table),
            columns,
        }
    }

    /// Number of columns this serializer expects per row
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Build `INSERT [IGNORE] INTO `table` VALUES (...);\n` for one row
    pub fn serialize(&self, values: &[RawValue]) -> Result<String, DumpError> {
        if values.len() != self.columns.len() {
            return Err(DumpError::ColumnCountMismatch {
                table: self.table.clone(),
                columns: self.columns.len(),
                values: values.len(),
            });
        }

        let mut statement = self.prefix.clone();

        for (i, (column, value)) in self.columns.iter().zip(values).enumerate() {
            if i > 0 {
                statement.push(',');
            }

            if value.is_null() {
                statement.push_str(NULL_LITERAL);
                continue;
            }

            let category = column
                .category
                .clone()
                .map_err(|type_name| DumpError::UnsupportedType { type_name })?;

            let literal = render(category, value).map_err(|source| DumpError::Conversion {
                column: column.name.clone(),
                source,
            })?;
            statement.push_str(&literal);
        }

        statement.push_str(");\n");
        Ok(statement)
    }
}

/// Serialize a single row without keeping a [`RowSerializer`] around
///
/// # Examples
///
/// ```
/// # use mysql_sqldump::dump::{serialize_row, ColumnDescriptor, RawValue};
/// let columns = vec![
///     ColumnDescriptor::new("id", "INT"),
///     ColumnDescriptor::new("name", "VARCHAR"),
/// ];
/// let sql = serialize_row("t", &columns, &[RawValue::Int(1), "O'Brien".into()], false).unwrap();
/// assert_eq!(sql, "INSERT INTO `t` VALUES (1,'O''Brien');\n");
/// ```
pub fn serialize_row(
    table: &str,
    columns: &[ColumnDescriptor],
    values: &[RawValue],
    ignore_duplicates: bool,
) -> Result<String, DumpError> {
    RowSerializer::new(table, columns, ignore_duplicates).serialize(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "INT"),
            ColumnDescriptor::new("name", "VARCHAR"),
        ]
    }

    #[test]
    fn test_insert_statement() {
        let sql = serialize_row("t", &columns(), &[RawValue::Int(1), "O'Brien".into()], false)
            .unwrap();
        assert_eq!(sql, "INSERT INTO `t` VALUES (1,'O''Brien');\n");
    }

    #[test]
    fn test_insert_ignore_statement() {
        let sql =
            serialize_row("t", &columns(), &[RawValue::Int(1), "O'Brien".into()], true).unwrap();
        assert_eq!(sql, "INSERT IGNORE INTO `t` VALUES (1,'O''Brien');\n");
    }

    #[test]
    fn test_null_cells() {
        let sql = serialize_row("t", &columns(), &[RawValue::Null, "x".into()], false).unwrap();
        assert_eq!(sql, "INSERT INTO `t` VALUES (NULL,'x');\n");
    }

    #[test]
    fn test_unsupported_column_fails_on_value() {
        let columns = vec![
            ColumnDescriptor::new("id", "INT"),
            ColumnDescriptor::new("shape", "GEOMETRY"),
        ];
        let serializer = RowSerializer::new("geo", &columns, false);

        // An all-null unsupported column still serializes
        assert_eq!(
            serializer.serialize(&[RawValue::Int(1), RawValue::Null]).unwrap(),
            "INSERT INTO `geo` VALUES (1,NULL);\n"
        );

        let err = serializer
            .serialize(&[RawValue::Int(2), RawValue::Bytes(vec![1, 2])])
            .unwrap_err();
        assert!(matches!(
            err,
            DumpError::UnsupportedType { ref type_name } if type_name == "GEOMETRY"
        ));
    }

    #[test]
    fn test_conversion_error_names_column() {
        let columns = vec![ColumnDescriptor::new("born", "DATE")];
        let err = serialize_row("people", &columns, &["1990-01-01".into()], false).unwrap_err();
        match err {
            DumpError::Conversion { column, source } => {
                assert_eq!(column, "born");
                assert_eq!(source.category, ValueCategory::Date);
            }
            other => panic!("expected conversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_boolean_column_refuses_wide_value() {
        let columns = vec![ColumnDescriptor::new("flag", "BOOLEAN")];
        let err = serialize_row("t", &columns, &["2".into()], false).unwrap_err();
        assert!(matches!(err, DumpError::Conversion { ref column, .. } if column == "flag"));

        let sql = serialize_row("t", &columns, &["1".into()], false).unwrap();
        assert_eq!(sql, "INSERT INTO `t` VALUES (true);\n");
    }

    #[test]
    fn test_width_mismatch() {
        let err = serialize_row("t", &columns(), &[RawValue::Int(1)], false).unwrap_err();
        assert!(matches!(
            err,
            DumpError::ColumnCountMismatch {
                columns: 2,
                values: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_mixed_types_row() {
        let columns = vec![
            ColumnDescriptor::new("id", "BIGINT UNSIGNED"),
            ColumnDescriptor::new("price", "DECIMAL"),
            ColumnDescriptor::new("blob", "BLOB"),
            ColumnDescriptor::new("active", "BOOLEAN"),
            ColumnDescriptor::new("kind", "ENUM"),
        ];
        let sql = serialize_row(
            "items",
            &columns,
            &[
                "18446744073709551615".into(),
                "9.99".into(),
                RawValue::Bytes(vec![0xca, 0xfe]),
                RawValue::Bool(true),
                "small".into(),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `items` VALUES (18446744073709551615,9.99,0xCAFE,true,'small');\n"
        );
    }
}
