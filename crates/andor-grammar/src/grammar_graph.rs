//! Compile an alternative-list grammar into a decision graph.
//!
//! Every rule symbol becomes an OR vertex. Each of its alternatives becomes
//! an AND vertex named `_{Symbol}_{n}` (1-based) whose ordered children are
//! the alternative's tokens. Tokens that are not rule symbols are registered
//! as terminals the first time they appear.

use std::collections::BTreeMap;

use andor_core::{AogFile, DecisionGraph, GraphError, GuidedDecisionGraph};
use tracing::debug;

use crate::error::GrammarError;
use crate::rules::Grammar;

/// A populated [`DecisionGraph`] plus the grammar's default start symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarGraph {
    graph: DecisionGraph,
    start: Option<String>,
}

impl GrammarGraph {
    /// Compile a bare rule map.
    pub fn new(rules: &BTreeMap<String, Vec<String>>) -> Result<Self, GrammarError> {
        Ok(Self {
            graph: compile(rules)?,
            start: None,
        })
    }

    /// Compile a grammar, keeping its default start symbol.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self, GrammarError> {
        Ok(Self {
            graph: compile(&grammar.rules)?,
            start: grammar.start.clone(),
        })
    }

    /// Wrap a previously compiled graph.
    pub fn from_snapshot(file: AogFile) -> Self {
        Self {
            graph: file.graph,
            start: file.start,
        }
    }

    /// Package this graph for writing as a `.aog` file.
    pub fn to_snapshot(&self) -> AogFile {
        AogFile::new(self.graph.clone(), self.start.clone())
    }

    /// The compiled graph.
    pub fn graph(&self) -> &DecisionGraph {
        &self.graph
    }

    /// Take ownership of the compiled graph.
    pub fn into_graph(self) -> DecisionGraph {
        self.graph
    }

    /// The grammar's default start symbol, if it named one.
    pub fn default_start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Start a guided session at `start`.
    pub fn guide(&self, start: &str) -> Result<GuidedDecisionGraph<'_>, GraphError> {
        GuidedDecisionGraph::new(&self.graph, start)
    }

    /// Start a guided session at the default start symbol.
    pub fn guide_default(&self) -> Result<GuidedDecisionGraph<'_>, GraphError> {
        self.guide(self.default_start().unwrap_or_default())
    }
}

fn compile(rules: &BTreeMap<String, Vec<String>>) -> Result<DecisionGraph, GrammarError> {
    let mut graph = DecisionGraph::new();

    // Register every rule first so alternatives can reference any of them.
    for symbol in rules.keys() {
        graph.add_vertex_or(symbol.as_str())?;
    }

    for (symbol, alternatives) in rules {
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyRule(symbol.clone()));
        }

        let mut alternative_names = Vec::with_capacity(alternatives.len());
        for (i, alternative) in alternatives.iter().enumerate() {
            let tokens: Vec<&str> = alternative.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(GrammarError::EmptyAlternative {
                    symbol: symbol.clone(),
                    index: i + 1,
                });
            }

            let name = format!("_{symbol}_{}", i + 1);
            graph.add_vertex_and(name.as_str())?;
            for token in &tokens {
                if !graph.contains(token) {
                    graph.add_vertex_and(*token)?;
                }
            }
            graph.add_edge(&name, &tokens)?;
            alternative_names.push(name);
        }
        graph.add_edge(symbol, &alternative_names)?;
    }

    debug!(
        rules = rules.len(),
        vertices = graph.vertex_count(),
        terminals = graph.terminal_count(),
        "Compiled grammar"
    );
    Ok(graph)
}
