//! Pending-symbol queues: one live derivation hypothesis each.

use crate::graph::{DecisionGraph, VertexId};

/// An immutable queue of vertices still to be derived.
///
/// Stored back-to-front so that replacing the head is a pop plus an extend.
/// Equality, ordering and hashing are structural.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration {
    /// Last element is the head of the queue.
    stack: Vec<VertexId>,
}

impl Configuration {
    /// The single-symbol queue a session starts from.
    pub fn start(root: VertexId) -> Self {
        Self { stack: vec![root] }
    }

    /// Build a queue from front-to-back symbols.
    #[cfg(test)]
    pub(crate) fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = VertexId>,
        I::IntoIter: DoubleEndedIterator,
    {
        Self {
            stack: symbols.into_iter().rev().collect(),
        }
    }

    /// An empty queue is a finished derivation.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of pending symbols.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Next symbol to derive.
    pub fn head(&self) -> Option<VertexId> {
        self.stack.last().copied()
    }

    /// Pending symbols, head first.
    pub fn symbols(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Vertex names of the pending symbols, head first.
    pub fn render<'g>(&self, graph: &'g DecisionGraph) -> Vec<&'g str> {
        self.symbols().map(|id| graph.name_of(id)).collect()
    }

    /// Remove and return the head.
    pub(crate) fn take_head(&mut self) -> Option<VertexId> {
        self.stack.pop()
    }

    /// Put `symbols` (front-to-back) in front of the queue.
    pub(crate) fn prepend(&mut self, symbols: &[VertexId]) {
        self.stack.extend(symbols.iter().rev());
    }
}
