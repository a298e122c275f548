//! Error types for graph construction, traversal, and snapshots.

use thiserror::Error;

/// Errors raised while building a graph or anchoring a session on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate vertex name: {0}")]
    DuplicateVertex(String),

    #[error("the empty vertex name is reserved for the accept marker")]
    ReservedName,

    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("vertex {vertex} references unknown child {child}")]
    UnknownChild { vertex: String, child: String },

    #[error("edges already declared for vertex {0}")]
    EdgesAlreadyDeclared(String),

    #[error("no start vertex given")]
    MissingStart,

    #[error("start vertex not found: {0}")]
    UnknownStart(String),

    #[error("left-recursive cycle through vertex {0}")]
    LeftRecursion(String),

    #[error("vertex {vertex} references out-of-range child index {index}")]
    DanglingChild { vertex: String, index: u32 },
}

/// Errors raised by a guided traversal session.
///
/// A failed call never changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("cannot pop an empty construction")]
    EmptyConstruction,

    #[error("{0:?} is not a valid choice here")]
    InvalidChoice(String),
}

/// Errors from the `.aog` snapshot format.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid AOG magic bytes")]
    InvalidMagic,

    #[error("unsupported AOG version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailed { expected: String, actual: String },

    #[error("AOG file too short: need at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}
