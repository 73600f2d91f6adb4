// Library root: re-exports all modules so integration tests and the binary
// can access the crate's public API.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod matchup;
pub mod report;
pub mod view;
