use std::path::PathBuf;

/// Errors raised by matrix arithmetic, the network and the training driver.
#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    /// Two matrices could not be combined by `op`.
    #[error("cannot {op}: left is {}x{}, right is {}x{}", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
