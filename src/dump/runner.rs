// ABOUTME: Orchestrates a full database dump into a SQL script
// ABOUTME: Sequences banner, per-table DROP/CREATE/INSERT blocks, and the closing banner

use super::observer::{DumpObserver, DumpSummary, TableSummary};
use super::row::RowSerializer;
use super::source::{DumpSource, RowSink};
use super::tables::{idempotent_create, select_tables};
use super::value::{ColumnDescriptor, RawValue};
use crate::config::DumpOptions;
use crate::error::DumpError;
use chrono::Local;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

const RULE: &str = "-- ----------------------------";

/// Dump `database` from `source` as a SQL script into `writer`
///
/// The script opens with a banner carrying the start time, then for each
/// selected table (in engine order unless an explicit list is given):
/// 1. `DROP TABLE IF EXISTS` when `drop_table` is set
/// 2. the table's DDL, rewritten to `CREATE TABLE IF NOT EXISTS`
/// 3. one `INSERT` per row when `data` is set, streamed from the source
///
/// and closes with a banner carrying the elapsed time.
///
/// Output goes through a `BufWriter` that is flushed before returning, on
/// success and on error alike.
///
/// # Errors
///
/// Any connection, query, type or conversion failure aborts the dump at that
/// point. Whatever was already written stays in `writer`; callers should
/// treat it as an incomplete script.
pub async fn dump_database<S, W>(
    source: &mut S,
    database: &str,
    options: &DumpOptions,
    writer: W,
    observer: &mut dyn DumpObserver,
) -> Result<DumpSummary, DumpError>
where
    S: DumpSource + ?Sized,
    W: Write,
{
    let clock = Instant::now();
    let started_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    observer.dump_started(database, &started_at);

    let mut out = BufWriter::new(writer);
    let result =
        write_dump(source, database, options, &mut out, observer, &started_at, clock).await;

    let result = match (result, out.flush()) {
        (Ok(tables), Ok(())) => Ok(DumpSummary {
            database: database.to_string(),
            started_at,
            elapsed: clock.elapsed(),
            tables,
        }),
        (Ok(_), Err(e)) => Err(DumpError::Io(e)),
        (Err(e), _) => Err(e),
    };

    match &result {
        Ok(summary) => observer.dump_finished(summary),
        Err(e) => observer.dump_failed(e),
    }

    result
}

async fn write_dump<S, W>(
    source: &mut S,
    database: &str,
    options: &DumpOptions,
    out: &mut W,
    observer: &mut dyn DumpObserver,
    started_at: &str,
    clock: Instant,
) -> Result<Vec<TableSummary>, DumpError>
where
    S: DumpSource + ?Sized,
    W: Write,
{
    write_header(out, started_at)?;

    source.use_database(database).await?;

    let reported = if options.dumps_all_tables() {
        source.list_tables().await?
    } else {
        Vec::new()
    };
    let tables = select_tables(&reported, options);

    let mut summaries = Vec::with_capacity(tables.len());
    for (idx, table) in tables.iter().enumerate() {
        observer.table_started(table, idx + 1, tables.len());

        if options.drop_table {
            writeln!(out, "DROP TABLE IF EXISTS `{}`;", table)?;
        }

        let ddl = source.create_table(table).await?;
        write_structure(out, table, &ddl)?;

        let mut rows = 0;
        if options.data {
            write_banner(out, &format!("Records of {}", table))?;
            let mut sink = InsertSink {
                table,
                ignore_duplicates: options.insert_ignore,
                serializer: None,
                out: &mut *out,
                observer: &mut *observer,
                rows: 0,
            };
            rows = source.scan_rows(table, &mut sink).await?;
            out.write_all(b"\n\n")?;
        }

        let summary = TableSummary {
            name: table.clone(),
            dropped: options.drop_table,
            data: options.data,
            rows,
        };
        observer.table_finished(&summary);
        summaries.push(summary);
    }

    write_footer(out, clock.elapsed())?;
    Ok(summaries)
}

/// Renders streamed rows straight into the output
struct InsertSink<'a, W: Write> {
    table: &'a str,
    ignore_duplicates: bool,
    serializer: Option<RowSerializer>,
    out: &'a mut W,
    observer: &'a mut dyn DumpObserver,
    rows: u64,
}

impl<W: Write> RowSink for InsertSink<'_, W> {
    fn columns(&mut self, columns: &[ColumnDescriptor]) -> Result<(), DumpError> {
        self.serializer = Some(RowSerializer::new(self.table, columns, self.ignore_duplicates));
        Ok(())
    }

    fn row(&mut self, values: &[RawValue]) -> Result<(), DumpError> {
        let serializer = self
            .serializer
            .as_ref()
            .ok_or_else(|| DumpError::ColumnCountMismatch {
                table: self.table.to_string(),
                columns: 0,
                values: values.len(),
            })?;

        let statement = serializer.serialize(values)?;
        self.out.write_all(statement.as_bytes())?;

        self.rows += 1;
        self.observer.row_written(self.table, self.rows);
        Ok(())
    }
}

fn write_banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "-- {}", title)?;
    writeln!(out, "{}", RULE)
}

fn write_header<W: Write>(out: &mut W, started_at: &str) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "-- MySQL Database Dump")?;
    writeln!(out, "-- Start Time: {}", started_at)?;
    writeln!(out, "{}", RULE)?;
    out.write_all(b"\n\n")
}

fn write_structure<W: Write>(out: &mut W, table: &str, ddl: &str) -> std::io::Result<()> {
    write_banner(out, &format!("Table structure for {}", table))?;
    out.write_all(idempotent_create(ddl).as_bytes())?;
    out.write_all(b";\n\n\n\n")
}

fn write_footer<W: Write>(out: &mut W, elapsed: Duration) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "-- Dumped by mysql-sqldump")?;
    writeln!(out, "-- Cost Time: {:?}", elapsed)?;
    writeln!(out, "{}", RULE)
}
