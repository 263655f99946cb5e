//! Search and sort over the canonical record set.
//!
//! - [`filter`]: Pattern compilation ([`Matcher`]) and filtering
//! - [`sort`]: Column comparators and stable sorting
//! - [`engine`]: [`QueryEngine`], memoizing both stages for a [`QueryState`]

pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::{QueryEngine, QueryState, QueryStats};
pub use filter::{compile, filter_records, Matcher};
pub use sort::{compare, sort_records, SortDirection, SortKey, SortSpec};
