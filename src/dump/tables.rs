// ABOUTME: Resolves which tables a dump covers and prepares their DDL
// ABOUTME: Inclusion list beats exclusion list beats "all tables"

use crate::config::DumpOptions;
use std::collections::HashSet;

/// Pick the tables to dump
///
/// - A non-empty inclusion list is used verbatim, in the order given
/// - Otherwise every reported table, in engine order, minus the exclusion list
///
/// # Examples
///
/// ```
/// # use mysql_sqldump::config::DumpOptions;
/// # use mysql_sqldump::dump::select_tables;
/// let reported = vec!["a".to_string(), "b".to_string(), "c".to_string()];
///
/// let options = DumpOptions::default().with_exclude_tables(["b"]);
/// assert_eq!(select_tables(&reported, &options), vec!["a", "c"]);
///
/// let options = options.with_tables(["c", "b"]);
/// assert_eq!(select_tables(&reported, &options), vec!["c", "b"]);
/// ```
pub fn select_tables(reported: &[String], options: &DumpOptions) -> Vec<String> {
    if !options.dumps_all_tables() {
        return options.tables.clone();
    }

    let excluded: HashSet<&str> = options.exclude_tables.iter().map(String::as_str).collect();

    reported
        .iter()
        .filter(|table| !excluded.contains(table.as_str()))
        .cloned()
        .collect()
}

/// Rewrite the first `CREATE TABLE` into `CREATE TABLE IF NOT EXISTS`
///
/// Only one substitution is made, so the phrase inside a column comment or
/// default value further along is left alone.
pub fn idempotent_create(statement: &str) -> String {
    statement.replacen("CREATE TABLE", "CREATE TABLE IF NOT EXISTS", 1)
}
