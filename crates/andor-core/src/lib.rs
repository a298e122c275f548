//! AND/OR decision graphs and guided sentence construction.
//!
//! A context-free grammar is stored as a [`DecisionGraph`] of AND vertices
//! (ordered conjunction; childless ones are terminal tokens) and OR vertices
//! (exclusive choice). A [`GuidedDecisionGraph`] walks that graph as a
//! nondeterministic automaton: the caller picks one token at a time from
//! [`GuidedDecisionGraph::choices`], every grammar interpretation consistent
//! with the picks so far stays live, and any pick can be undone with
//! [`GuidedDecisionGraph::pop`].
//!
//! The [`Resolver`] underneath computes frontiers: for a queue of pending
//! symbols, every `(next token, remaining queue)` pair.
//!
//! The empty token `""` is reserved as the accept marker.

pub mod configuration;
pub mod error;
pub mod graph;
pub mod guide;
pub mod resolver;
pub mod serialize;

pub use configuration::Configuration;
pub use error::{GraphError, SnapshotError, TraversalError};
pub use graph::{DecisionGraph, Vertex, VertexId, VertexKind};
pub use guide::{GuidedDecisionGraph, LiveSet};
pub use resolver::{check_left_recursion, Frontier, Resolver, Step, Transition};
pub use serialize::AogFile;
