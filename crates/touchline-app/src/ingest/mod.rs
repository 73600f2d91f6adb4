// Data ingestion boundary: lineup documents and prediction CSVs are turned
// into fully-defaulted `Player` records here. The only gap left for the lineup
// engine is an unplaced position.

pub mod lineup;
pub mod predictions;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid lineup document {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} has no `{column}` column")]
    MissingColumn { path: String, column: &'static str },
}
