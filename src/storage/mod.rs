//! Storage layer for studybuddy.
//!
//! `SQLite` persistence for the history of completed focus intervals.

mod database;
mod migrations;

pub use database::Database;
