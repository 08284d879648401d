// ABOUTME: Command implementations for the CLI subcommands
// ABOUTME: Exports the dump and tables commands

pub mod dump;
pub mod tables;

pub use dump::dump;
pub use tables::tables;
