//! Type lattice and common-ancestor queries
//!
//! The taxonomy is a strict tree rooted at `mixed_scalar_object`. It is built
//! once and never mutated. `ARRAY` and `OBJECT` describe container shape and are
//! deliberately absent: only the contents of containers take part in queries.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::{Directed, Direction, Graph};

use super::{
    BIGINTEGER, BOOLEAN, DATE, DBREF, FLOAT, GENERAL_SCALAR, INTEGER, LATTICE_OBJECT,
    MIXED_SCALAR_OBJECT, NULL, NUMBER, OID, STRING, TIMESTAMP, TypeError, UNKNOWN,
};

/// (child, parent) edges of the taxonomy. Parents are listed before children.
const TAXONOMY: &[(&str, &str)] = &[
    (GENERAL_SCALAR, MIXED_SCALAR_OBJECT),
    (LATTICE_OBJECT, MIXED_SCALAR_OBJECT),
    (NUMBER, GENERAL_SCALAR),
    (STRING, GENERAL_SCALAR),
    (DATE, GENERAL_SCALAR),
    (TIMESTAMP, GENERAL_SCALAR),
    (UNKNOWN, GENERAL_SCALAR),
    (FLOAT, NUMBER),
    (BIGINTEGER, NUMBER),
    (INTEGER, BIGINTEGER),
    (BOOLEAN, INTEGER),
    // `string` is both the character-string type and the grouping of identifier-like types
    (OID, STRING),
    (DBREF, STRING),
];

/// Fixed type taxonomy
///
/// Edges point from parent to child.
#[derive(Debug, Clone)]
pub struct TypeLattice {
    graph: Graph<&'static str, (), Directed>,
    nodes: HashMap<&'static str, NodeIndex>,
    root: NodeIndex,
}

impl TypeLattice {
    /// Build the standard taxonomy
    pub fn new() -> Self {
        let mut graph = Graph::<&'static str, (), Directed>::new();
        let mut nodes = HashMap::new();

        let root = graph.add_node(MIXED_SCALAR_OBJECT);
        nodes.insert(MIXED_SCALAR_OBJECT, root);

        for &(child, parent) in TAXONOMY {
            let parent_node = *nodes
                .entry(parent)
                .or_insert_with(|| graph.add_node(parent));
            let child_node = *nodes.entry(child).or_insert_with(|| graph.add_node(child));
            graph.add_edge(parent_node, child_node, ());
        }

        Self { graph, nodes, root }
    }

    /// Name of the root type
    pub fn root(&self) -> &'static str {
        self.graph[self.root]
    }

    /// Whether `name` is a node of the lattice
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Direct supertype of `name` (`None` for the root)
    pub fn parent(&self, name: &str) -> Result<Option<&'static str>, TypeError> {
        let node = self.node(name)?;
        Ok(self.parent_node(node).map(|p| self.graph[p]))
    }

    /// Path from `name` up to the root, `name` first
    pub fn ancestors(&self, name: &str) -> Result<Vec<&'static str>, TypeError> {
        let node = self.node(name)?;
        Ok(self
            .path_to_root(node)
            .into_iter()
            .map(|n| self.graph[n])
            .collect())
    }

    /// Whether `ancestor` lies on the path from `name` to the root (inclusive)
    pub fn is_subtype(&self, name: &str, ancestor: &str) -> Result<bool, TypeError> {
        let target = self.node(ancestor)?;
        let node = self.node(name)?;
        Ok(self.path_to_root(node).contains(&target))
    }

    /// Lowest common ancestor of every listed type
    ///
    /// - empty input gives `null`
    /// - a single type (or only duplicates of it) is returned as-is, without a
    ///   lattice lookup
    /// - otherwise every name must be a lattice node
    pub fn common_parent_type<S: AsRef<str>>(&self, types: &[S]) -> Result<String, TypeError> {
        let Some(first) = types.first() else {
            return Ok(NULL.to_string());
        };
        let first = first.as_ref();
        if types.iter().all(|t| t.as_ref() == first) {
            return Ok(first.to_string());
        }

        // Ancestors of the first type, root last; keep the deepest one shared by all
        let mut candidates = self.path_to_root(self.node(first)?);
        for name in &types[1..] {
            let path = self.path_to_root(self.node(name.as_ref())?);
            let shared = candidates
                .iter()
                .position(|c| path.contains(c))
                .unwrap_or(candidates.len() - 1);
            candidates.drain(..shared);
        }

        Ok(self.graph[candidates[0]].to_string())
    }

    fn node(&self, name: &str) -> Result<NodeIndex, TypeError> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    fn parent_node(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .next()
    }

    fn path_to_root(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent_node(current) {
            path.push(parent);
            current = parent;
        }
        path
    }
}

impl Default for TypeLattice {
    fn default() -> Self {
        Self::new()
    }
}
