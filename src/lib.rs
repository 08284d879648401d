// ABOUTME: Library module for mysql-sqldump
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod commands;
pub mod config;
pub mod dump;
pub mod error;
pub mod mysql;
pub mod utils;
