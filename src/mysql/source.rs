// ABOUTME: DumpSource implementation over a single sqlx MySQL connection
// ABOUTME: Streams SELECT results over the text protocol and decodes cells into RawValues

use crate::dump::category::{classify, ValueCategory};
use crate::dump::source::{DumpSource, RowSink};
use crate::dump::value::{ColumnDescriptor, RawValue};
use crate::error::DumpError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures::TryStreamExt;
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};

/// Dumps a MySQL server through one connection
///
/// Statements are sent with `sqlx::raw_sql`, i.e. as plain text queries, so
/// cells arrive the way the server formats them. Only integers and temporals
/// are decoded into native values; everything else is passed on as the raw
/// bytes the server sent.
pub struct MySqlSource {
    conn: MySqlConnection,
}

impl MySqlSource {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Connect to `connection_string`, retrying up to `max_retries` times
    pub async fn connect(connection_string: &str, max_retries: u32) -> Result<Self, DumpError> {
        let conn = super::connect_with_retry(connection_string, max_retries).await?;
        Ok(Self::new(conn))
    }

    /// Close the connection gracefully
    pub async fn close(self) -> Result<(), DumpError> {
        self.conn
            .close()
            .await
            .map_err(|e| DumpError::query(e, "closing connection"))
    }
}

#[async_trait(?Send)]
impl DumpSource for MySqlSource {
    async fn use_database(&mut self, database: &str) -> Result<(), DumpError> {
        let sql = format!("USE `{}`", database);
        sqlx::raw_sql(&sql)
            .execute(&mut self.conn)
            .await
            .map_err(|e| DumpError::Connection {
                message: format!("Failed to select database '{}'", database),
                source: Some(e),
            })?;

        tracing::debug!("Using database '{}'", database);
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>, DumpError> {
        let rows = sqlx::raw_sql("SHOW TABLES")
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| DumpError::query(e, "listing tables"))?;

        let tables = rows
            .iter()
            .map(|row| row.try_get_unchecked::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DumpError::query(e, "reading table names"))?;

        tracing::debug!("Found {} tables", tables.len());
        Ok(tables)
    }

    async fn create_table(&mut self, table: &str) -> Result<String, DumpError> {
        let sql = format!("SHOW CREATE TABLE `{}`", table);
        let context = || format!("fetching structure of `{}`", table);

        let row = sqlx::raw_sql(&sql)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|e| DumpError::query(e, context()))?;

        // Column 0 is the table name, column 1 the DDL ("Create Table" or "Create View")
        row.try_get_unchecked::<String, _>(1)
            .map_err(|e| DumpError::query(e, context()))
    }

    async fn scan_rows(&mut self, table: &str, sink: &mut dyn RowSink) -> Result<u64, DumpError> {
        let sql = format!("SELECT * FROM `{}`", table);
        let context = || format!("reading rows of `{}`", table);

        let mut rows = sqlx::raw_sql(&sql).fetch(&mut self.conn);
        let mut categories: Option<Vec<Option<ValueCategory>>> = None;
        let mut count = 0u64;

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| DumpError::query(e, context()))?
        {
            if categories.is_none() {
                let columns = describe_columns(&row);
                categories = Some(columns.iter().map(|c| classify(&c.type_name).ok()).collect());
                sink.columns(&columns)?;
            }

            let values = categories
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(index, category)| decode_cell(&row, index, *category))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DumpError::query(e, context()))?;

            sink.row(&values)?;
            count += 1;
        }

        tracing::debug!("Streamed {} rows from `{}`", count, table);
        Ok(count)
    }
}

fn describe_columns(row: &MySqlRow) -> Vec<ColumnDescriptor> {
    row.columns()
        .iter()
        .map(|column| {
            ColumnDescriptor::new(column.name(), engine_type_name(column.type_info().name()))
        })
        .collect()
}

/// Undo the driver's renaming of column types
///
/// sqlx reports any `TINYINT(1)` column as `BOOLEAN`, but the server stores
/// the full `-128..=127` (or `0..=255`) range there. The column is dumped as
/// the integer the server holds. Signedness is not exposed by the driver and
/// does not change how the value renders.
fn engine_type_name(driver_name: &str) -> &str {
    match driver_name {
        "BOOLEAN" => "TINYINT",
        other => other,
    }
}

/// Decode one cell into the representation its category expects
///
/// A cell that does not parse into the native type (a zero date, an
/// unsigned BIGINT beyond `i64::MAX`) falls back to its raw bytes; the
/// renderer decides whether those bytes are acceptable.
fn decode_cell(
    row: &MySqlRow,
    index: usize,
    category: Option<ValueCategory>,
) -> Result<RawValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(RawValue::Null);
    }

    let native = match category {
        Some(ValueCategory::Integer) => row
            .try_get_unchecked::<i64, _>(index)
            .ok()
            .map(RawValue::Int),
        Some(ValueCategory::Date) => row
            .try_get_unchecked::<NaiveDate, _>(index)
            .ok()
            .map(|date| RawValue::Temporal(date.and_time(NaiveTime::default()))),
        Some(ValueCategory::DateTime | ValueCategory::Timestamp) => row
            .try_get_unchecked::<NaiveDateTime, _>(index)
            .ok()
            .map(RawValue::Temporal),
        _ => None,
    };

    match native {
        Some(value) => Ok(value),
        None => Ok(RawValue::Bytes(row.try_get_unchecked::<Vec<u8>, _>(index)?)),
    }
}
