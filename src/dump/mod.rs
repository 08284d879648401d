// ABOUTME: Row-to-SQL serialization engine and dump orchestration
// ABOUTME: Classifies column types, renders literals, and writes replayable scripts

pub mod category;
pub mod literal;
pub mod memory;
pub mod observer;
pub mod row;
pub mod runner;
pub mod source;
pub mod tables;
pub mod value;

pub use category::{classify, normalize_type_name, ValueCategory};
pub use literal::render;
pub use observer::{DumpObserver, DumpSummary, NoopObserver, TableSummary, TracingObserver};
pub use row::{serialize_row, RowSerializer};
pub use runner::dump_database;
pub use source::{DumpSource, RowSink};
pub use tables::{idempotent_create, select_tables};
pub use value::{ColumnDescriptor, RawValue};
