//! Image stack sources

pub mod sources;

use sv_core::ViewerError;
use thiserror::Error;

pub use sources::{demo_stack, load_csv_dir, load_csv_slice, DemoStackParams};

/// Errors that can occur while loading a stack
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("{file}: cannot parse {value:?} at row {row}, column {column}")]
    Parse {
        file: String,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("no slices found in {0}")]
    Empty(String),

    #[error("invalid demo parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Stack(#[from] ViewerError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
