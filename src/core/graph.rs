use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// A function identified by the file that defines it and its simple name.
///
/// Two files may define the same simple name; those are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionKey {
    pub file: String,
    pub name: String,
}

impl FunctionKey {
    pub fn new(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.name)
    }
}

pub type DefinedFunctionSet = BTreeSet<FunctionKey>;

/// Caller to the simple names it invokes, not yet resolved.
pub type RawCallMap = BTreeMap<FunctionKey, BTreeSet<String>>;

pub type CallGraphInner = Graph<FunctionKey, (), Directed>;

/// Resolved caller -> callee graph over the defined functions.
#[derive(Debug, Clone)]
pub struct CallGraph {
    graph: CallGraphInner,
    node_map: HashMap<FunctionKey, NodeIndex>,
}

impl CallGraph {
    pub fn function_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionKey> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges as (caller, callee), in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&FunctionKey, &FunctionKey)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    pub fn callees(&self, caller: &FunctionKey) -> BTreeSet<&FunctionKey> {
        self.neighbors(caller, Direction::Outgoing)
    }

    pub fn callers(&self, callee: &FunctionKey) -> BTreeSet<&FunctionKey> {
        self.neighbors(callee, Direction::Incoming)
    }

    pub fn in_degree(&self, key: &FunctionKey) -> usize {
        self.degree(key, Direction::Incoming)
    }

    pub fn out_degree(&self, key: &FunctionKey) -> usize {
        self.degree(key, Direction::Outgoing)
    }

    fn neighbors(&self, key: &FunctionKey, direction: Direction) -> BTreeSet<&FunctionKey> {
        match self.node_map.get(key) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| &self.graph[n])
                .collect(),
            None => BTreeSet::new(),
        }
    }

    fn degree(&self, key: &FunctionKey, direction: Direction) -> usize {
        self.node_map
            .get(key)
            .map(|&idx| self.graph.edges_directed(idx, direction).count())
            .unwrap_or(0)
    }
}

/// In/out degree per function, derived from a [`CallGraph`].
///
/// Both maps are total over the graph's functions; uncalled functions map to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeTallies {
    pub in_degree: BTreeMap<FunctionKey, usize>,
    pub out_degree: BTreeMap<FunctionKey, usize>,
}

impl DegreeTallies {
    pub fn from_graph(graph: &CallGraph) -> Self {
        let mut tallies = Self::default();
        for key in graph.functions() {
            tallies.in_degree.insert(key.clone(), 0);
            tallies.out_degree.insert(key.clone(), 0);
        }
        for (caller, callee) in graph.edges() {
            *tallies.out_degree.entry(caller.clone()).or_insert(0) += 1;
            *tallies.in_degree.entry(callee.clone()).or_insert(0) += 1;
        }
        tallies
    }

    pub fn in_degree(&self, key: &FunctionKey) -> usize {
        self.in_degree.get(key).copied().unwrap_or(0)
    }

    pub fn out_degree(&self, key: &FunctionKey) -> usize {
        self.out_degree.get(key).copied().unwrap_or(0)
    }

    /// Sum of in-degrees, equal to the number of resolved edges.
    pub fn total_edges(&self) -> usize {
        self.in_degree.values().sum()
    }
}

/// Builds a [`CallGraph`]. Edges are only accepted between known functions and
/// are deduplicated.
pub struct GraphBuilder {
    graph: CallGraphInner,
    node_map: HashMap<FunctionKey, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn add_function(&mut self, key: FunctionKey) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&key) {
            return index;
        }
        let index = self.graph.add_node(key.clone());
        self.node_map.insert(key, index);
        index
    }

    pub fn add_edge(&mut self, caller: &FunctionKey, callee: &FunctionKey) -> Option<EdgeIndex> {
        let source_idx = self.node_map.get(caller)?;
        let target_idx = self.node_map.get(callee)?;
        Some(self.graph.update_edge(*source_idx, *target_idx, ()))
    }

    pub fn build(self) -> CallGraph {
        CallGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
