use std::path::PathBuf;
use thiserror::Error;

/// Structural errors, they abort the run.
/// Per-value problems (bad dates, bad numbers) never show up here,
/// they are carried as `None` in the records instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read csv {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("missing required column '{column}' in {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("line {line} of {} has {fields} fields, the header has {expected}", .path.display())]
    LongRow {
        path: PathBuf,
        line: u64,
        fields: usize,
        expected: usize,
    },
    #[error("could not render chart: {0}")]
    Render(String),
    #[error("could not serialize figure: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
