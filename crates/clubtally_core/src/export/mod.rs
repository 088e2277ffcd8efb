//! Ranking export.
//!
//! # Responsibility
//! - Render the leaderboard as a spreadsheet-compatible CSV table.
//! - Write the table to a per-run file handed to the platform share sheet.

pub mod ranking_csv;
