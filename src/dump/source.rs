// ABOUTME: Interface the dump orchestrator needs from a database connection
// ABOUTME: Rows are pushed into a RowSink as they are read from the cursor

use super::value::{ColumnDescriptor, RawValue};
use crate::error::DumpError;
use async_trait::async_trait;

/// Receives the rows of one table as they stream out of the source
pub trait RowSink {
    /// Called once, before the first row, with the result column layout
    fn columns(&mut self, columns: &[ColumnDescriptor]) -> Result<(), DumpError>;

    /// Called for every row, values positionally matching `columns`
    fn row(&mut self, values: &[RawValue]) -> Result<(), DumpError>;
}

/// A SQL engine that can be dumped
///
/// One logical sequence of calls per dump; implementations hold a single
/// connection and need not be shareable.
#[async_trait(?Send)]
pub trait DumpSource {
    /// Select the database subsequent statements run against (`USE <db>`)
    async fn use_database(&mut self, database: &str) -> Result<(), DumpError>;

    /// Table names in the order the engine reports them (`SHOW TABLES`)
    async fn list_tables(&mut self) -> Result<Vec<String>, DumpError>;

    /// The verbatim `CREATE TABLE` statement (`SHOW CREATE TABLE <table>`)
    async fn create_table(&mut self, table: &str) -> Result<String, DumpError>;

    /// Stream every row of the table into `sink` (`SELECT * FROM <table>`)
    ///
    /// Returns the number of rows delivered. The first error, whether from the
    /// source or the sink, stops the scan and is returned.
    async fn scan_rows(&mut self, table: &str, sink: &mut dyn RowSink) -> Result<u64, DumpError>;
}
