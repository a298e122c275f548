//! Frontier computation over pending-symbol queues.
//!
//! Given a configuration, the frontier is every `(token, residual)` pair
//! reachable by unfolding AND vertices in place and branching over OR
//! alternatives until each branch's head is a terminal. An empty
//! configuration yields the single accept pair `("", [])`.
//!
//! Expansion only terminates on graphs without left recursion, so a
//! [`Resolver`] can only be created after [`check_left_recursion`] has
//! accepted everything reachable from its root.

use std::collections::{BTreeSet, HashSet};

use tracing::{trace, warn};

use crate::configuration::Configuration;
use crate::error::GraphError;
use crate::graph::{DecisionGraph, Vertex, VertexId, VertexKind};

/// What a transition contributes to the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// A terminal token.
    Token(VertexId),
    /// Stop here: the derivation is complete. Rendered as `""`.
    Accept,
}

/// One frontier pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub step: Step,
    /// What remains to be derived after `step`.
    pub residual: Configuration,
}

/// Deduplicated set of transitions.
pub type Frontier = BTreeSet<Transition>;

/// Frontier engine anchored at a validated root vertex.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'g> {
    graph: &'g DecisionGraph,
    root: VertexId,
}

impl<'g> Resolver<'g> {
    /// Anchor a resolver at `start`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MissingStart`] if `start` is empty
    /// - [`GraphError::UnknownStart`] if no such vertex exists
    /// - [`GraphError::LeftRecursion`] if expansion from `start` could loop
    pub fn new(graph: &'g DecisionGraph, start: &str) -> Result<Self, GraphError> {
        if start.is_empty() {
            return Err(GraphError::MissingStart);
        }
        let root = graph
            .id_of(start)
            .ok_or_else(|| GraphError::UnknownStart(start.to_string()))?;
        check_left_recursion(graph, root)?;
        Ok(Self { graph, root })
    }

    /// The graph this resolver reads.
    pub fn graph(&self) -> &'g DecisionGraph {
        self.graph
    }

    /// The start vertex.
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// The depth-0 configuration `[root]`.
    pub fn initial(&self) -> Configuration {
        Configuration::start(self.root)
    }

    /// Compute the frontier of `config`.
    ///
    /// `config` must only mention vertices reachable from the root.
    pub fn frontier(&self, config: &Configuration) -> Frontier {
        let mut frontier = Frontier::new();
        let mut pending = vec![config.clone()];
        // Ambiguous grammars reach the same intermediate queue many ways.
        let mut expanded = HashSet::new();

        while let Some(mut queue) = pending.pop() {
            if !expanded.insert(queue.clone()) {
                continue;
            }
            let Some(head) = queue.take_head() else {
                frontier.insert(Transition {
                    step: Step::Accept,
                    residual: queue,
                });
                continue;
            };

            let vertex = self.graph.node(head);
            if vertex.is_terminal() {
                frontier.insert(Transition {
                    step: Step::Token(head),
                    residual: queue,
                });
                continue;
            }
            match vertex.kind {
                VertexKind::And => {
                    queue.prepend(vertex.children());
                    pending.push(queue);
                }
                VertexKind::Or => {
                    for &alternative in vertex.children() {
                        let mut branch = queue.clone();
                        branch.prepend(&[alternative]);
                        pending.push(branch);
                    }
                }
            }
        }

        trace!(
            pending = config.len(),
            expanded = expanded.len(),
            transitions = frontier.len(),
            "Resolved frontier"
        );
        frontier
    }

    /// Surface text of a step: the terminal's name, or `""` for accept.
    pub fn text(&self, step: Step) -> &'g str {
        match step {
            Step::Token(id) => self.graph.name_of(id),
            Step::Accept => "",
        }
    }

    /// Step named by `token`, if `token` is `""` or a terminal.
    pub fn step_for(&self, token: &str) -> Option<Step> {
        if token.is_empty() {
            return Some(Step::Accept);
        }
        let id = self.graph.id_of(token)?;
        self.graph.node(id).is_terminal().then_some(Step::Token(id))
    }
}

/// Reject graphs whose expansion from `root` would never reach a token.
///
/// Follows leading edges (the first child of an AND vertex, every
/// alternative of an OR vertex) from each vertex reachable from `root` and
/// fails on the first cycle. A conjunction-only cycle is the degenerate case.
pub fn check_left_recursion(graph: &DecisionGraph, root: VertexId) -> Result<(), GraphError> {
    let mut done: HashSet<VertexId> = HashSet::new();
    let mut on_path: HashSet<VertexId> = HashSet::new();
    // (vertex, index of its next leading child)
    let mut path: Vec<(VertexId, usize)> = Vec::new();

    for origin in reachable_from(graph, root) {
        if done.contains(&origin) {
            continue;
        }
        on_path.insert(origin);
        path.push((origin, 0));

        while let Some(frame) = path.last_mut() {
            let (id, next) = *frame;
            let Some(&child) = leading_children(graph.node(id)).get(next) else {
                path.pop();
                on_path.remove(&id);
                done.insert(id);
                continue;
            };
            frame.1 += 1;

            if on_path.contains(&child) {
                let err = GraphError::LeftRecursion(graph.name_of(child).to_string());
                warn!(root = graph.name_of(root), error = %err, "Rejected left-recursive graph");
                return Err(err);
            }
            if !done.contains(&child) {
                on_path.insert(child);
                path.push((child, 0));
            }
        }
    }
    Ok(())
}

/// Children that can become the head of a queue without emitting a token.
fn leading_children(vertex: &Vertex) -> &[VertexId] {
    let children = vertex.children();
    match vertex.kind {
        VertexKind::And => &children[..children.len().min(1)],
        VertexKind::Or => children,
    }
}

/// Every vertex reachable from `root` along any edge, in discovery order.
fn reachable_from(graph: &DecisionGraph, root: VertexId) -> Vec<VertexId> {
    let mut seen = HashSet::from([root]);
    let mut order = vec![root];
    let mut work = vec![root];
    while let Some(id) = work.pop() {
        for &child in graph.node(id).children() {
            if seen.insert(child) {
                order.push(child);
                work.push(child);
            }
        }
    }
    order
}
