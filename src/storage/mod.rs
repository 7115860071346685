//! Storage layer for the cricket fantasy data model
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Record types, creation inputs and patches
//! - `schema`: Database connection, table definitions and write transactions
//! - `validate`: Pure checks run before every write
//! - `repository`: The generic get/create/update/delete/list contract
//! - one module per entity family with its CRUD operations
//! - `overview` and `seed`: cross-table reads and bulk import

pub mod bets;
pub mod history;
pub mod matches;
pub mod models;
pub mod overview;
pub mod performances;
pub mod players;
pub mod pools;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod teams;
pub mod validate;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use repository::{Entity, Repository};
pub use schema::CricketDatabase;
pub use seed::{SeedData, SeedSummary};
pub use validate::StatLine;
