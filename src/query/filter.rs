//! Search filtering.
//!
//! A search is a regular expression matched, unanchored, against the string
//! rendering of every field of a record. An empty search matches everything;
//! a search that does not compile disables filtering instead of failing.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::data::SimulationRecord;
use crate::error::CompileError;

/// A compiled search.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches every record.
    All,
    Pattern(Regex),
}

/// Compile a search pattern. The empty pattern compiles to [`Matcher::All`].
pub fn compile(pattern: &str) -> Result<Matcher, CompileError> {
    if pattern.is_empty() {
        return Ok(Matcher::All);
    }
    Ok(Matcher::Pattern(Regex::new(pattern)?))
}

impl Matcher {
    /// Check whether any field of the record matches.
    pub fn matches(&self, record: &SimulationRecord) -> bool {
        let re = match self {
            Matcher::All => return true,
            Matcher::Pattern(re) => re,
        };

        record.field_strings().iter().any(|s| re.is_match(s))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Matcher::All)
    }
}

/// Filter records by a search pattern, preserving order.
///
/// Returns the input itself (same allocation) when nothing is filtered out by
/// construction: an empty pattern or one that fails to compile.
pub fn filter_records(
    records: &Arc<[SimulationRecord]>,
    pattern: &str,
) -> Arc<[SimulationRecord]> {
    let matcher = match compile(pattern) {
        Ok(Matcher::All) => return Arc::clone(records),
        Ok(matcher) => matcher,
        Err(e) => {
            debug!(pattern, error = %e, "search pattern rejected, filtering disabled");
            return Arc::clone(records);
        }
    };

    records
        .iter()
        .filter(|r| matcher.matches(r))
        .cloned()
        .collect()
}
