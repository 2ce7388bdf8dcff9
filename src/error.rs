use std::path::PathBuf;
use thiserror::Error;

/// A dotted field path that does not name anything on a country record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty field path")]
    Empty,
    #[error("unknown field `{segment}` in path `{path}`")]
    UnknownField { path: String, segment: String },
    #[error("unexpected `{segment}` after `length` in path `{path}`")]
    TrailingSegment { path: String, segment: String },
    #[error("`{path}` is a list; use `{path}.length`")]
    NotNumeric { path: String },
    #[error("`{path}` is not a list and has no length")]
    NotAList { path: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("unknown metric selected: `{0}`")]
    Unknown(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Failure to obtain the country dataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: simd_json::Error,
    },
}
