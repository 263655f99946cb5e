//! Memoizing query engine.
//!
//! The filter stage is recomputed only when the canonical set or the search
//! text changes. The sort stage is recomputed only when the filter output or
//! the sort spec changes.

use std::sync::Arc;

use tracing::trace;

use super::filter::filter_records;
use super::sort::{sort_records, SortKey, SortSpec};
use crate::data::{RecordSet, SimulationRecord};

/// The user-controlled query inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Search pattern (regular expression). Empty disables filtering.
    pub search: String,
    /// Active sort, `None` keeps filtered order.
    pub sort: Option<SortSpec>,
}

impl QueryState {
    pub fn new(search: impl Into<String>, sort: Option<SortSpec>) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    /// Select a column the way a header click does.
    ///
    /// Re-selecting the active ascending column flips it to descending; any
    /// other selection sorts that column ascending.
    pub fn select_column(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some(spec) if spec == SortSpec::asc(key) => Some(SortSpec::desc(key)),
            _ => Some(SortSpec::asc(key)),
        };
    }
}

/// How often each stage actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub filter_runs: u64,
    pub sort_runs: u64,
}

#[derive(Debug)]
struct FilterCache {
    revision: u64,
    /// The filtered set itself; revisions are caller-chosen and may repeat.
    records: Arc<[SimulationRecord]>,
    search: String,
    generation: u64,
    output: Arc<[SimulationRecord]>,
}

#[derive(Debug)]
struct SortCache {
    filter_generation: u64,
    spec: Option<SortSpec>,
    output: Arc<[SimulationRecord]>,
}

/// Produces the displayed sequence for a record set and a query.
#[derive(Debug, Default)]
pub struct QueryEngine {
    filter_cache: Option<FilterCache>,
    sort_cache: Option<SortCache>,
    generation: u64,
    stats: QueryStats,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter then sort, reusing cached stages when their inputs are unchanged.
    pub fn run(&mut self, set: &RecordSet, state: &QueryState) -> Arc<[SimulationRecord]> {
        let (generation, filtered) = self.filtered(set, &state.search);
        self.sorted(generation, filtered, state.sort)
    }

    pub fn stats(&self) -> QueryStats {
        self.stats
    }

    fn filtered(&mut self, set: &RecordSet, search: &str) -> (u64, Arc<[SimulationRecord]>) {
        if let Some(cache) = &self.filter_cache {
            if cache.revision == set.revision()
                && Arc::ptr_eq(&cache.records, set.records())
                && cache.search == search
            {
                trace!(revision = set.revision(), "filter cache hit");
                return (cache.generation, Arc::clone(&cache.output));
            }
        }

        let output = filter_records(set.records(), search);
        self.generation += 1;
        self.stats.filter_runs += 1;
        trace!(
            revision = set.revision(),
            matched = output.len(),
            "filter recomputed"
        );

        self.filter_cache = Some(FilterCache {
            revision: set.revision(),
            records: Arc::clone(set.records()),
            search: search.to_string(),
            generation: self.generation,
            output: Arc::clone(&output),
        });
        (self.generation, output)
    }

    fn sorted(
        &mut self,
        filter_generation: u64,
        filtered: Arc<[SimulationRecord]>,
        spec: Option<SortSpec>,
    ) -> Arc<[SimulationRecord]> {
        if let Some(cache) = &self.sort_cache {
            if cache.filter_generation == filter_generation && cache.spec == spec {
                trace!("sort cache hit");
                return Arc::clone(&cache.output);
            }
        }

        let output: Arc<[SimulationRecord]> = match spec {
            Some(spec) => {
                self.stats.sort_runs += 1;
                sort_records(&filtered, spec).into()
            }
            None => filtered,
        };

        self.sort_cache = Some(SortCache {
            filter_generation,
            spec,
            output: Arc::clone(&output),
        });
        output
    }
}
