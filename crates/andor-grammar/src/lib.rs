//! Compact grammars for the guided AND/OR traversal engine.
//!
//! A [`Grammar`] maps each symbol to its alternatives, written as
//! space-separated token sequences. [`GrammarGraph`] compiles it into an
//! [`andor_core::DecisionGraph`] and hands out guided sessions:
//!
//! ```
//! use andor_grammar::{rules, GrammarGraph};
//!
//! let graph = GrammarGraph::from_grammar(&rules::sample()).unwrap();
//! let mut guide = graph.guide("Sentence").unwrap();
//! guide.choose("the").unwrap();
//! assert!(guide.choices().contains("squirrel"));
//! ```

pub mod error;
pub mod grammar_graph;
pub mod load;
pub mod rules;

pub use error::GrammarError;
pub use grammar_graph::GrammarGraph;
pub use load::{load, save_snapshot, SourceFormat};
pub use rules::Grammar;
