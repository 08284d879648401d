// ABOUTME: In-memory DumpSource holding tables, DDL and rows
// ABOUTME: Used for fixtures and to exercise the orchestrator without a server

use super::source::{DumpSource, RowSink};
use super::value::{ColumnDescriptor, RawValue};
use crate::error::DumpError;
use async_trait::async_trait;

/// One table of a [`MemorySource`]
#[derive(Debug, Clone)]
pub struct MemoryTable {
    pub name: String,
    pub create_statement: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<RawValue>>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>, create_statement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_statement: create_statement.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, name: &str, type_name: &str) -> Self {
        self.columns.push(ColumnDescriptor::new(name, type_name));
        self
    }

    pub fn row(mut self, values: Vec<RawValue>) -> Self {
        self.rows.push(values);
        self
    }
}

/// A database kept entirely in memory
///
/// Tables are reported in insertion order. Statements the source received
/// are recorded in `statements` so callers can check what was asked for.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub database: String,
    pub tables: Vec<MemoryTable>,
    pub statements: Vec<String>,
}

impl MemorySource {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    pub fn with_table(mut self, table: MemoryTable) -> Self {
        self.tables.push(table);
        self
    }

    fn table(&self, name: &str) -> Result<&MemoryTable, DumpError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DumpError::Query {
                context: format!("reading table `{}`", name),
                source: sqlx::Error::RowNotFound,
            })
    }
}

#[async_trait(?Send)]
impl DumpSource for MemorySource {
    async fn use_database(&mut self, database: &str) -> Result<(), DumpError> {
        self.statements.push(format!("USE `{}`", database));
        if database != self.database {
            return Err(DumpError::connection(format!("Unknown database '{}'", database)));
        }
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>, DumpError> {
        self.statements.push("SHOW TABLES".to_string());
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn create_table(&mut self, table: &str) -> Result<String, DumpError> {
        self.statements.push(format!("SHOW CREATE TABLE `{}`", table));
        Ok(self.table(table)?.create_statement.clone())
    }

    async fn scan_rows(&mut self, table: &str, sink: &mut dyn RowSink) -> Result<u64, DumpError> {
        self.statements.push(format!("SELECT * FROM `{}`", table));
        let table = self.table(table)?;

        let mut count = 0;
        for (i, values) in table.rows.iter().enumerate() {
            if i == 0 {
                sink.columns(&table.columns)?;
            }
            sink.row(values)?;
            count += 1;
        }

        Ok(count)
    }
}
