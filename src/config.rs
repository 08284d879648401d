// ABOUTME: Dump options, output target, and TOML configuration loading
// ABOUTME: Builder methods mirror the flags accepted on the command line

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What a dump covers and how it is written
///
/// Table selection: a non-empty `tables` list wins over `exclude_tables`,
/// which filters the full table list. With neither, every table is dumped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DumpOptions {
    /// Emit INSERT statements for table rows
    pub data: bool,
    /// Explicit tables to dump, in this order
    pub tables: Vec<String>,
    /// Tables to skip when dumping all tables
    pub exclude_tables: Vec<String>,
    /// Accepted for compatibility; it never changes table selection, since
    /// every table is dumped when `tables` is empty and `tables` wins otherwise
    pub all_tables: bool,
    /// Emit `DROP TABLE IF EXISTS` before each table
    pub drop_table: bool,
    /// Use `INSERT IGNORE` instead of `INSERT`
    pub insert_ignore: bool,
}

impl DumpOptions {
    pub fn with_data(mut self) -> Self {
        self.data = true;
        self
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_all_tables(mut self) -> Self {
        self.all_tables = true;
        self
    }

    pub fn with_drop_table(mut self) -> Self {
        self.drop_table = true;
        self
    }

    pub fn with_insert_ignore(mut self) -> Self {
        self.insert_ignore = true;
        self
    }

    /// Whether the engine's table list is consulted
    ///
    /// An explicit table list always wins, even with `all_tables` set.
    pub fn dumps_all_tables(&self) -> bool {
        self.tables.is_empty()
    }

    /// Overlay `other` on top of these options
    ///
    /// Flags set in either are kept; non-empty lists in `other` replace ours.
    pub fn merge(&mut self, other: DumpOptions) {
        self.data |= other.data;
        self.all_tables |= other.all_tables;
        self.drop_table |= other.drop_table;
        self.insert_ignore |= other.insert_ignore;
        if !other.tables.is_empty() {
            self.tables = other.tables;
        }
        if !other.exclude_tables.is_empty() {
            self.exclude_tables = other.exclude_tables;
        }
    }
}

/// Where the SQL script is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => OutputTarget::File(path),
            _ => OutputTarget::Stdout,
        }
    }
}

/// Load dump options from a TOML file
///
/// ```toml
/// data = true
/// exclude_tables = ["sessions", "audit_log"]
/// drop_table = true
/// ```
pub fn load_dump_options_from_file(path: impl AsRef<Path>) -> Result<DumpOptions> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_dump_options(&content)
        .with_context(|| format!("Invalid dump configuration in {}", path.display()))
}

fn parse_dump_options(content: &str) -> Result<DumpOptions> {
    let options: DumpOptions =
        toml::from_str(content).context("Failed to parse TOML dump options")?;
    Ok(options)
}
