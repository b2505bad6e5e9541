use core_types::CoreError;
use std::path::PathBuf;
use store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterchangeError {
    #[error("Unsupported file format '{0}': expected .json, .csv or a directory")]
    UnsupportedFormat(String),

    #[error("Cannot tell which collection {0} holds; name it customers.csv, products.csv or orders.csv, or pass the collection explicitly")]
    UnknownCollection(PathBuf),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record at row {row} of {path}: {source}")]
    Record {
        path: PathBuf,
        row: usize,
        #[source]
        source: CoreError,
    },

    #[error("Inconsistent data at row {row} of {path}: {reason}")]
    Inconsistent {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Imported data was rejected by the record store: {0}")]
    Store(#[from] StoreError),
}

impl InterchangeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| InterchangeError::Io { path, source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Self {
        let path = path.into();
        move |source| InterchangeError::Json { path, source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>) -> impl FnOnce(csv::Error) -> Self {
        let path = path.into();
        move |source| InterchangeError::Csv { path, source }
    }
}
