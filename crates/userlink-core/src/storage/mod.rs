//! Storage layer: SQLite database bootstrap and schema migrations

pub mod database;
pub mod migrations;

pub use database::{Database, DatabaseConfig};
