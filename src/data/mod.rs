//! Record model and processing.
//!
//! This module turns raw, loosely-typed JSON candidates into validated
//! [`SimulationRecord`]s carrying a derived performance index.
//!
//! ## Submodules
//!
//! - [`record`]: The [`SimulationRecord`] model and its [`RecordValue`] column
//! - [`validate`]: Structural validation of raw candidates
//! - [`transform`]: Performance index derivation
//! - [`timestamp`]: Timestamp parsing and display
//! - [`aggregate`]: Per-status counts ([`StatusCounts`])
//! - [`generate`]: Sample payload generation
//!
//! ## Data Flow
//!
//! ```text
//! Vec<serde_json::Value> (raw JSON array)
//!        │
//!        ▼
//! validate_all()  ──▶ drops malformed candidates
//!        │
//!        ▼
//! transform_all() ──▶ sets performance_index
//!        │
//!        ▼
//! RecordSet (canonical, replaced wholesale on every load)
//! ```

pub mod aggregate;
pub mod generate;
pub mod record;
pub mod timestamp;
pub mod transform;
pub mod validate;

use std::sync::Arc;

use serde_json::Value;

pub use aggregate::StatusCounts;
pub use record::{format_number, RecordValue, SimulationRecord};
pub use transform::{performance_index, transform, transform_all};
pub use validate::{validate, validate_all};

/// Run the validator and the transformer over a raw payload.
pub fn prepare(raw: &[Value]) -> Vec<SimulationRecord> {
    transform_all(validate_all(raw))
}

/// The canonical record set.
///
/// Cheap to clone. Each load installs a new set with a new revision; the
/// records of an installed set are never mutated.
#[derive(Debug, Clone)]
pub struct RecordSet {
    revision: u64,
    records: Arc<[SimulationRecord]>,
}

impl RecordSet {
    pub fn new(revision: u64, records: Vec<SimulationRecord>) -> Self {
        Self {
            revision,
            records: records.into(),
        }
    }

    /// Monotonic load counter, used to key query caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn records(&self) -> &Arc<[SimulationRecord]> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::new(0, Vec::new())
    }
}
