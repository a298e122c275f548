//! The AND/OR decision graph store.
//!
//! A graph is a set of named vertices, each either an ordered conjunction
//! (AND) or an exclusive choice (OR), with at most one declared child list
//! per vertex. An AND vertex without children is a terminal: its name is the
//! literal token it contributes to a sentence.
//!
//! The graph holds no traversal logic; see [`crate::resolver`] and
//! [`crate::guide`] for that.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Dense index of a vertex inside one [`DecisionGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    /// Position of this vertex in registration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Composition semantics of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    /// All children, in order.
    And,
    /// Exactly one child.
    Or,
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexKind::And => write!(f, "AND"),
            VertexKind::Or => write!(f, "OR"),
        }
    }
}

/// A named vertex and its (optional) child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub name: String,
    pub kind: VertexKind,
    /// `None` until edges are declared.
    #[serde(default)]
    children: Option<Vec<VertexId>>,
}

impl Vertex {
    fn new(name: String, kind: VertexKind) -> Self {
        Self {
            name,
            kind,
            children: None,
        }
    }

    /// Ordered children (AND) or alternatives (OR). Empty if undeclared.
    pub fn children(&self) -> &[VertexId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether an edge list has been declared for this vertex.
    pub fn has_edges(&self) -> bool {
        self.children.is_some()
    }

    /// An AND vertex with no children contributes its own name as a token.
    pub fn is_terminal(&self) -> bool {
        self.kind == VertexKind::And && self.children().is_empty()
    }
}

/// Labeled AND/OR hypergraph.
///
/// Once built, a graph is only ever read: sessions borrow it immutably, so
/// any number of them can share one graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vertex>", into = "Vec<Vertex>")]
pub struct DecisionGraph {
    vertices: Vec<Vertex>,
    /// Index: name -> id
    names: HashMap<String, VertexId>,
}

impl DecisionGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Construction ---

    /// Register an ordered-conjunction vertex.
    pub fn add_vertex_and(&mut self, name: impl Into<String>) -> Result<VertexId, GraphError> {
        self.add_vertex(name.into(), VertexKind::And)
    }

    /// Register an exclusive-choice vertex.
    pub fn add_vertex_or(&mut self, name: impl Into<String>) -> Result<VertexId, GraphError> {
        self.add_vertex(name.into(), VertexKind::Or)
    }

    /// Register a vertex of the given kind.
    pub fn add_vertex(&mut self, name: String, kind: VertexKind) -> Result<VertexId, GraphError> {
        if name.is_empty() {
            return Err(GraphError::ReservedName);
        }
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }
        let id = VertexId(self.vertices.len() as u32);
        self.names.insert(name.clone(), id);
        self.vertices.push(Vertex::new(name, kind));
        Ok(id)
    }

    /// Declare the child list of `name`.
    ///
    /// Children must already be registered, though their own edges may be
    /// declared later. A vertex's edge list can be set only once. Nothing is
    /// changed when an error is returned.
    pub fn add_edge<I>(&mut self, name: &str, children: I) -> Result<(), GraphError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let id = self
            .id_of(name)
            .ok_or_else(|| GraphError::VertexNotFound(name.to_string()))?;
        if self.vertices[id.index()].has_edges() {
            return Err(GraphError::EdgesAlreadyDeclared(name.to_string()));
        }

        let resolved = children
            .into_iter()
            .map(|child| {
                let child = child.as_ref();
                self.id_of(child).ok_or_else(|| GraphError::UnknownChild {
                    vertex: name.to_string(),
                    child: child.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.vertices[id.index()].children = Some(resolved);
        Ok(())
    }

    // --- Structural queries ---

    /// Number of registered vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of terminal vertices.
    pub fn terminal_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_terminal()).count()
    }

    /// Number of vertices of a given kind (terminals count as AND).
    pub fn count_of(&self, kind: VertexKind) -> usize {
        self.vertices.iter().filter(|v| v.kind == kind).count()
    }

    /// Whether a vertex with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Kind of the named vertex.
    pub fn kind(&self, name: &str) -> Option<VertexKind> {
        self.get(name).map(|v| v.kind)
    }

    /// Child names of the named vertex, in declaration order.
    pub fn children(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name)
            .map(|v| v.children().iter().map(|&c| self.name_of(c)).collect())
    }

    /// Whether the named vertex is a terminal.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.get(name).is_some_and(Vertex::is_terminal)
    }

    /// Look up a vertex by name.
    pub fn get(&self, name: &str) -> Option<&Vertex> {
        self.id_of(name).map(|id| &self.vertices[id.index()])
    }

    /// Id of the named vertex.
    pub fn id_of(&self, name: &str) -> Option<VertexId> {
        self.names.get(name).copied()
    }

    /// Look up a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Iterate over all vertices in registration order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i as u32), v))
    }

    /// Names of all terminal vertices, in registration order.
    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.vertices
            .iter()
            .filter(|v| v.is_terminal())
            .map(|v| v.name.as_str())
    }

    /// Vertex for an id produced by this graph.
    pub(crate) fn node(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Name for an id produced by this graph.
    pub(crate) fn name_of(&self, id: VertexId) -> &str {
        &self.node(id).name
    }
}

impl TryFrom<Vec<Vertex>> for DecisionGraph {
    type Error = GraphError;

    fn try_from(vertices: Vec<Vertex>) -> Result<Self, Self::Error> {
        let mut names = HashMap::with_capacity(vertices.len());
        for (i, vertex) in vertices.iter().enumerate() {
            if vertex.name.is_empty() {
                return Err(GraphError::ReservedName);
            }
            if names.insert(vertex.name.clone(), VertexId(i as u32)).is_some() {
                return Err(GraphError::DuplicateVertex(vertex.name.clone()));
            }
        }
        for vertex in &vertices {
            let dangling = vertex
                .children()
                .iter()
                .find(|c| c.index() >= vertices.len());
            if let Some(dangling) = dangling {
                return Err(GraphError::DanglingChild {
                    vertex: vertex.name.clone(),
                    index: dangling.0,
                });
            }
        }
        Ok(Self { vertices, names })
    }
}

impl From<DecisionGraph> for Vec<Vertex> {
    fn from(graph: DecisionGraph) -> Self {
        graph.vertices
    }
}
