//! Loading grammars from disk.
//!
//! The format is picked by extension: `.toml` and `.json` hold the
//! alternative-list notation, `.aog` holds a compiled graph snapshot.

use std::path::Path;

use andor_core::AogFile;
use tracing::debug;

use crate::error::GrammarError;
use crate::grammar_graph::GrammarGraph;
use crate::rules::Grammar;

/// Grammar file formats understood by [`load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
    Snapshot,
}

impl SourceFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, GrammarError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(SourceFormat::Toml),
            "json" => Ok(SourceFormat::Json),
            "aog" => Ok(SourceFormat::Snapshot),
            _ => Err(GrammarError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read and compile the grammar at `path`.
pub fn load(path: &Path) -> Result<GrammarGraph, GrammarError> {
    let format = SourceFormat::from_path(path)?;
    let io_err = |source| GrammarError::Io {
        path: path.to_path_buf(),
        source,
    };

    let graph = match format {
        SourceFormat::Snapshot => {
            let data = std::fs::read(path).map_err(io_err)?;
            GrammarGraph::from_snapshot(AogFile::from_bytes(&data)?)
        }
        SourceFormat::Toml | SourceFormat::Json => {
            let text = std::fs::read_to_string(path).map_err(io_err)?;
            let grammar = if format == SourceFormat::Toml {
                Grammar::from_toml_str(&text)?
            } else {
                Grammar::from_json_str(&text)?
            };
            GrammarGraph::from_grammar(&grammar)?
        }
    };

    debug!(
        path = %path.display(),
        ?format,
        vertices = graph.graph().vertex_count(),
        "Loaded grammar"
    );
    Ok(graph)
}

/// Write `graph` as a `.aog` snapshot.
pub fn save_snapshot(graph: &GrammarGraph, path: &Path) -> Result<(), GrammarError> {
    let bytes = graph.to_snapshot().to_bytes()?;
    std::fs::write(path, bytes).map_err(|source| GrammarError::Io {
        path: path.to_path_buf(),
        source,
    })
}
