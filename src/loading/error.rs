use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input file '{0}' not found")]
    MissingInput(PathBuf),

    #[error("Failed to read input file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Parsing error processing CSV data in '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to assemble DataFrame from '{path}'")]
    FrameAssembly {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}
