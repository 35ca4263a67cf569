use polars::error::PolarsError;
use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing table: {}", .0.display())]
    MissingTable(PathBuf),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown season: {0}")]
    UnknownSeason(i64),
}
