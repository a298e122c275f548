//! Error types for grammar compilation and loading.

use std::path::PathBuf;

use andor_core::{GraphError, SnapshotError};

/// Errors from turning a grammar (or grammar file) into a graph.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("rule {0} has no alternatives")]
    EmptyRule(String),

    #[error("alternative {index} of rule {symbol} is empty")]
    EmptyAlternative { symbol: String, index: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing {format} grammar: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("unsupported grammar file extension: {0}")]
    UnsupportedFormat(String),
}
