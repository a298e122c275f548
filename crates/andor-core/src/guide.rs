//! Guided traversal sessions.
//!
//! A [`GuidedDecisionGraph`] builds a sentence one token at a time. It keeps
//! every derivation hypothesis that is consistent with the tokens chosen so
//! far, so a token that satisfies several alternatives keeps all of them
//! alive until later choices tell them apart.
//!
//! # Example
//!
//! ```
//! use andor_core::{DecisionGraph, GuidedDecisionGraph};
//!
//! let mut graph = DecisionGraph::new();
//! graph.add_vertex_and("Greeting").unwrap();
//! graph.add_vertex_or("Name").unwrap();
//! for token in ["hello", "world", "there"] {
//!     graph.add_vertex_and(token).unwrap();
//! }
//! graph.add_edge("Greeting", ["hello", "Name"]).unwrap();
//! graph.add_edge("Name", ["world", "there"]).unwrap();
//!
//! let mut guide = GuidedDecisionGraph::new(&graph, "Greeting").unwrap();
//! guide.choose("hello").unwrap();
//! assert!(guide.choices().contains("world"));
//! guide.choose("there").unwrap();
//! assert!(guide.is_complete());
//! assert_eq!(guide.construction().join(" "), "hello there");
//! ```

use std::collections::BTreeSet;
use std::mem;

use tracing::debug;

use crate::configuration::Configuration;
use crate::error::{GraphError, TraversalError};
use crate::graph::DecisionGraph;
use crate::resolver::{Resolver, Step};

/// Live configurations at one depth, deduplicated structurally.
pub type LiveSet = BTreeSet<Configuration>;

/// A stateful, undoable walk through a [`DecisionGraph`].
#[derive(Debug, Clone)]
pub struct GuidedDecisionGraph<'g> {
    resolver: Resolver<'g>,
    /// Committed steps, oldest first. An accept step can only be last.
    construction: Vec<Step>,
    /// Live set at the current depth.
    live: LiveSet,
    /// Live sets before each committed step; `history.len() == construction.len()`.
    history: Vec<LiveSet>,
}

impl<'g> GuidedDecisionGraph<'g> {
    /// Start a session at `start`.
    ///
    /// # Errors
    ///
    /// Fails if `start` is empty or unknown, or if the grammar below it is
    /// left-recursive.
    pub fn new(graph: &'g DecisionGraph, start: &str) -> Result<Self, GraphError> {
        Ok(Self::from_resolver(Resolver::new(graph, start)?))
    }

    /// Start a session from an already-validated resolver.
    pub fn from_resolver(resolver: Resolver<'g>) -> Self {
        Self {
            live: LiveSet::from([resolver.initial()]),
            resolver,
            construction: Vec::new(),
            history: Vec::new(),
        }
    }

    /// The graph being walked.
    pub fn graph(&self) -> &'g DecisionGraph {
        self.resolver.graph()
    }

    /// Name of the start vertex.
    pub fn start(&self) -> &'g str {
        self.resolver.text(Step::Token(self.resolver.root()))
    }

    /// Number of committed choices, including an accept marker.
    pub fn depth(&self) -> usize {
        self.construction.len()
    }

    /// Live configurations at the current depth.
    pub fn live_configurations(&self) -> &LiveSet {
        &self.live
    }

    /// Tokens committed so far.
    ///
    /// The accept marker pushed by `choose("")` is not a token and is left
    /// out, so a finished construction joins into its sentence.
    pub fn construction(&self) -> Vec<String> {
        self.tokens().map(String::from).collect()
    }

    /// True iff every live configuration is fully derived.
    pub fn is_complete(&self) -> bool {
        self.live.iter().all(Configuration::is_empty)
    }

    /// Distinct next tokens over all live configurations.
    ///
    /// Contains `""` when at least one hypothesis could stop here. Empty once
    /// the session is complete.
    pub fn choices(&self) -> BTreeSet<String> {
        if self.is_complete() {
            return BTreeSet::new();
        }
        self.live
            .iter()
            .flat_map(|q| self.resolver.frontier(q))
            .map(|t| self.resolver.text(t.step).to_string())
            .collect()
    }

    /// Distinct token sequences of length at most `depth` reachable from
    /// the current state. The session itself is not changed.
    ///
    /// A sequence ends early at `""`, which marks a complete derivation.
    /// Every other sequence has exactly `depth` tokens. `lookahead(1)` holds
    /// the same tokens as [`choices`](Self::choices). A depth of zero, or a
    /// complete session, gives the empty set.
    pub fn lookahead(&self, depth: usize) -> BTreeSet<Vec<String>> {
        if depth == 0 || self.is_complete() {
            return BTreeSet::new();
        }

        let mut finished: BTreeSet<Vec<Step>> = BTreeSet::new();
        let mut open: BTreeSet<(Vec<Step>, Configuration)> = self
            .live
            .iter()
            .map(|q| (Vec::new(), q.clone()))
            .collect();

        for _ in 0..depth {
            let mut next = BTreeSet::new();
            for (path, queue) in &open {
                for transition in self.resolver.frontier(queue) {
                    let mut extended = path.clone();
                    extended.push(transition.step);
                    match transition.step {
                        Step::Accept => {
                            finished.insert(extended);
                        }
                        Step::Token(_) => {
                            next.insert((extended, transition.residual));
                        }
                    }
                }
            }
            open = next;
        }

        finished
            .into_iter()
            .chain(open.into_iter().map(|(path, _)| path))
            .map(|path| {
                path.into_iter()
                    .map(|step| self.resolver.text(step).to_string())
                    .collect()
            })
            .collect()
    }

    /// Commit `token`, keeping only the hypotheses it advances.
    ///
    /// `""` commits the accept marker and prunes the session down to the
    /// hypotheses that are already complete.
    ///
    /// # Errors
    ///
    /// [`TraversalError::InvalidChoice`] if `token` is not in
    /// [`choices`](Self::choices). The session is left untouched.
    pub fn choose(&mut self, token: &str) -> Result<(), TraversalError> {
        let invalid = || TraversalError::InvalidChoice(token.to_string());

        let step = self.resolver.step_for(token).ok_or_else(invalid)?;
        if self.is_complete() {
            return Err(invalid());
        }

        let next: LiveSet = self
            .live
            .iter()
            .flat_map(|q| self.resolver.frontier(q))
            .filter(|t| t.step == step)
            .map(|t| t.residual)
            .collect();
        if next.is_empty() {
            return Err(invalid());
        }

        self.history.push(mem::replace(&mut self.live, next));
        self.construction.push(step);
        debug!(
            token,
            depth = self.depth(),
            live = self.live.len(),
            "Committed choice"
        );
        Ok(())
    }

    /// Commit several tokens in order, all or nothing.
    ///
    /// # Errors
    ///
    /// The first invalid token's error. Choices made earlier in the same
    /// call are undone before returning.
    pub fn choose_all<I>(&mut self, tokens: I) -> Result<(), TraversalError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let depth = self.depth();
        for token in tokens {
            if let Err(e) = self.choose(token.as_ref()) {
                self.rewind_to(depth);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Undo the last choice and return its token (`""` for the accept
    /// marker). The live set goes back to exactly what it was before.
    ///
    /// # Errors
    ///
    /// [`TraversalError::EmptyConstruction`] at depth zero.
    pub fn pop(&mut self) -> Result<String, TraversalError> {
        let (Some(step), Some(previous)) = (self.construction.pop(), self.history.pop()) else {
            return Err(TraversalError::EmptyConstruction);
        };
        self.live = previous;
        let token = self.resolver.text(step);
        debug!(
            token,
            depth = self.depth(),
            live = self.live.len(),
            "Undid choice"
        );
        Ok(token.to_string())
    }

    /// Undo every choice.
    pub fn reset(&mut self) {
        self.rewind_to(0);
    }

    /// Rendered templates of every distinguishable continuation.
    ///
    /// Each frontier pair of each live configuration becomes the current
    /// construction, then the pair's token, then its residual symbols by
    /// bare name (choices not yet made), joined by single spaces.
    pub fn constructs(&self) -> BTreeSet<String> {
        let prefix: Vec<&str> = self.tokens().collect();
        self.live
            .iter()
            .flat_map(|q| self.resolver.frontier(q))
            .map(|t| {
                let mut parts = prefix.clone();
                parts.push(self.resolver.text(t.step));
                parts.extend(t.residual.render(self.graph()));
                parts.retain(|part| !part.is_empty());
                parts.join(" ")
            })
            .collect()
    }

    fn tokens(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.construction
            .iter()
            .filter(|step| **step != Step::Accept)
            .map(|&step| self.resolver.text(step))
    }

    fn rewind_to(&mut self, depth: usize) {
        while self.construction.len() > depth {
            self.construction.pop();
            if let Some(previous) = self.history.pop() {
                self.live = previous;
            }
        }
    }
}
