use std::collections::{BTreeSet, HashMap};

use super::graph::{CallGraph, DefinedFunctionSet, FunctionKey, GraphBuilder, RawCallMap};

/// Every defined function whose simple name is `simple_name`.
///
/// This is a name match only: no imports, receivers or scopes are
/// considered, so an ambiguous name yields all candidates.
pub fn resolve_name(simple_name: &str, defined: &DefinedFunctionSet) -> BTreeSet<FunctionKey> {
    defined
        .iter()
        .filter(|key| key.simple_name() == simple_name)
        .cloned()
        .collect()
}

/// Name-indexed resolver from raw call names to defined functions
#[derive(Debug, Clone, Default)]
pub struct FunctionResolver {
    /// Simple name -> every function defined with it
    function_index: HashMap<String, Vec<FunctionKey>>,
}

impl FunctionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_indexes(&mut self, defined: &DefinedFunctionSet) {
        self.function_index.clear();
        self.function_index.reserve(defined.len());

        for key in defined {
            self.function_index
                .entry(key.name.clone())
                .or_default()
                .push(key.clone());
        }
    }

    /// Candidates for one called name; empty when the name is external.
    pub fn candidates(&self, called_name: &str) -> &[FunctionKey] {
        self.function_index
            .get(called_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve every raw call into an edge, fanning out on ambiguous names
    /// and dropping names that match no definition.
    pub fn resolve_calls(&self, defined: &DefinedFunctionSet, raw_calls: &RawCallMap) -> CallGraph {
        let mut builder = GraphBuilder::new();
        for key in defined {
            builder.add_function(key.clone());
        }

        let mut dropped = 0usize;
        for (caller, called_names) in raw_calls {
            for called_name in called_names {
                let candidates = self.candidates(called_name);
                if candidates.is_empty() {
                    dropped += 1;
                    continue;
                }
                for callee in candidates {
                    if builder.add_edge(caller, callee).is_none() {
                        log::debug!("Ignoring edge from unknown caller {caller}");
                    }
                }
            }
        }

        let graph = builder.build();
        log::info!(
            "Resolved {} call edges ({} external names dropped)",
            graph.edge_count(),
            dropped
        );
        graph
    }
}
