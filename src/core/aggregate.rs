use super::graph::{DefinedFunctionSet, RawCallMap};
use crate::parsers::FileAnalysis;

/// Merges per-file results into project-wide state.
///
/// Definitions are unioned. A caller seen again replaces its previous call
/// set instead of extending it; with one parse per file path this never
/// happens.
#[derive(Debug, Default)]
pub struct CallGraphAggregator {
    defined: DefinedFunctionSet,
    raw_calls: RawCallMap,
    files_merged: usize,
}

impl CallGraphAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, analysis: FileAnalysis) {
        self.defined.extend(analysis.definitions);
        for (caller, called_names) in analysis.raw_calls {
            self.raw_calls.insert(caller, called_names);
        }
        self.files_merged += 1;
    }

    pub fn files_merged(&self) -> usize {
        self.files_merged
    }

    pub fn finish(self) -> (DefinedFunctionSet, RawCallMap) {
        (self.defined, self.raw_calls)
    }
}
