use thiserror::Error;

/// Errors that can occur while loading a grid
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported grid format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
