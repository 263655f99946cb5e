//! Multi-type column sorting.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::timestamp::epoch_millis;
use crate::data::SimulationRecord;

/// Column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive text.
    #[default]
    Id,
    /// Parsed instant.
    Timestamp,
    /// Numeric, non-numbers sort lowest.
    Value,
    /// Case-insensitive text.
    ParameterSet,
    /// Case-insensitive text.
    Status,
    /// Numeric.
    PerformanceIndex,
}

impl SortKey {
    /// All columns in table order.
    pub const ALL: [SortKey; 6] = [
        SortKey::Id,
        SortKey::Timestamp,
        SortKey::Value,
        SortKey::ParameterSet,
        SortKey::Status,
        SortKey::PerformanceIndex,
    ];

    /// Field name as it appears in the raw data.
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Timestamp => "timestamp",
            SortKey::Value => "value",
            SortKey::ParameterSet => "parameter_set",
            SortKey::Status => "status",
            SortKey::PerformanceIndex => "performance_index",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = SortKey::ALL.iter().map(|k| k.name()).collect();
                format!("unknown sort key '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// An active sort: column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Ascending comparison of two records on one column.
///
/// Absent fields are the minimum. Non-numeric values on numeric columns
/// compare as negative infinity. Unparseable timestamps compare like absent
/// ones, so they gather at the low end and keep their relative order.
pub fn compare(a: &SimulationRecord, b: &SimulationRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Value => {
            let (av, bv) = (a.value(), b.value());
            match (av.is_absent(), bv.is_absent()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => cmp_numeric(av.as_number(), bv.as_number()),
            }
        }
        SortKey::PerformanceIndex => match (a.performance_index(), b.performance_index()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (x, y) => cmp_numeric(x, y),
        },
        SortKey::Timestamp => epoch_millis(a.timestamp()).cmp(&epoch_millis(b.timestamp())),
        SortKey::Id => cmp_text(a.id(), b.id()),
        SortKey::ParameterSet => cmp_text(a.parameter_set(), b.parameter_set()),
        SortKey::Status => cmp_text(a.status(), b.status()),
    }
}

fn cmp_numeric(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::NEG_INFINITY);
    let b = b.unwrap_or(f64::NEG_INFINITY);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Return a sorted copy of `records`. The sort is stable.
///
/// Descending order is the exact reverse of the ascending comparison, so
/// absent and non-numeric entries move to the end.
pub fn sort_records(records: &[SimulationRecord], spec: SortSpec) -> Vec<SimulationRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, spec.key);
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}
