//! Status counts for the chart collaborator.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::record::SimulationRecord;

/// Number of records per `status`, ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    entries: Vec<(String, usize)>,
}

impl StatusCounts {
    /// Count records per status over the canonical set.
    pub fn from_records(records: &[SimulationRecord]) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in records {
            match positions.get(record.status()) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    positions.insert(record.status(), entries.len());
                    entries.push((record.status().to_string(), 1));
                }
            }
        }

        Self { entries }
    }

    /// Count for a status, `0` if it never appears.
    pub fn get(&self, status: &str) -> usize {
        self.entries
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(s, n)| (s.as_str(), *n))
    }

    /// Number of distinct statuses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (status, count) in &self.entries {
            map.serialize_entry(status, count)?;
        }
        map.end()
    }
}
