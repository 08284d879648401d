// ABOUTME: Structured dump events and the summary returned to callers
// ABOUTME: Keeps logging and timing out of the serialization core

use crate::error::DumpError;
use crate::utils::sanitize_identifier;
use serde::Serialize;
use std::time::Duration;

/// Per-table outcome of a dump
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub dropped: bool,
    pub data: bool,
    pub rows: u64,
}

/// Result object of a completed dump
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DumpSummary {
    pub database: String,
    /// Local start time, `YYYY-MM-DD HH:MM:SS`
    pub started_at: String,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
    pub tables: Vec<TableSummary>,
}

impl DumpSummary {
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

/// Receives progress events while a dump runs
///
/// All methods default to doing nothing.
pub trait DumpObserver {
    fn dump_started(&mut self, _database: &str, _started_at: &str) {}

    /// `position` is 1-based
    fn table_started(&mut self, _table: &str, _position: usize, _total: usize) {}

    fn row_written(&mut self, _table: &str, _rows_so_far: u64) {}

    fn table_finished(&mut self, _summary: &TableSummary) {}

    fn dump_finished(&mut self, _summary: &DumpSummary) {}

    fn dump_failed(&mut self, _error: &DumpError) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl DumpObserver for NoopObserver {}

/// Observer that reports events through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl DumpObserver for TracingObserver {
    fn dump_started(&mut self, database: &str, started_at: &str) {
        tracing::info!(
            "Dumping database '{}' (started at {})",
            sanitize_identifier(database),
            started_at
        );
    }

    fn table_started(&mut self, table: &str, position: usize, total: usize) {
        tracing::info!(
            "Dumping table {}/{}: '{}'",
            position,
            total,
            sanitize_identifier(table)
        );
    }

    fn table_finished(&mut self, summary: &TableSummary) {
        if summary.data {
            tracing::debug!(
                "✓ Table '{}' done ({} rows)",
                sanitize_identifier(&summary.name),
                summary.rows
            );
        } else {
            tracing::debug!(
                "✓ Table '{}' done (structure only)",
                sanitize_identifier(&summary.name)
            );
        }
    }

    fn dump_finished(&mut self, summary: &DumpSummary) {
        tracing::info!(
            "✓ Dumped {} table(s), {} row(s) in {:?}",
            summary.tables.len(),
            summary.total_rows(),
            summary.elapsed
        );
    }

    fn dump_failed(&mut self, error: &DumpError) {
        tracing::error!("Dump failed: {}", error);
    }
}
