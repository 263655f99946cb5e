//! The simulation-run record and its loosely-typed `value` field.

use std::fmt;

use serde::Serialize;

/// The `value` field of a record.
///
/// Raw data carries numbers, nulls and stray strings in this column; all three
/// are legal and downstream code degrades gracefully on the non-numeric cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Number(f64),
    Text(String),
    Absent,
}

impl RecordValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RecordValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RecordValue::Absent)
    }
}

impl fmt::Display for RecordValue {
    /// Renders the value the way a search sees it: absent renders empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Number(n) => f.write_str(&format_number(*n)),
            RecordValue::Text(s) => f.write_str(s),
            RecordValue::Absent => Ok(()),
        }
    }
}

/// Render a number the way the dashboard's consumers print it.
///
/// Shortest round-trip digits, no sign on zero, and exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`) outside `1e-6 <= |n| < 1e21`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.is_nan() || (1e-6..1e21).contains(&n.abs()) {
        return n.to_string();
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{}e+{}", mantissa, e),
        _ => exp,
    }
}

/// A single validated simulation run.
///
/// Records are only built by the validator and are immutable afterwards,
/// except for the one-time write of `performance_index` by the transformer.
/// The index is never read from raw input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    id: String,
    timestamp: String,
    value: RecordValue,
    parameter_set: String,
    status: String,
    performance_index: Option<f64>,
}

impl SimulationRecord {
    pub(crate) fn new(
        id: String,
        timestamp: String,
        value: RecordValue,
        parameter_set: String,
        status: String,
    ) -> Self {
        Self {
            id,
            timestamp,
            value,
            parameter_set,
            status,
            performance_index: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn value(&self) -> &RecordValue {
        &self.value
    }

    pub fn parameter_set(&self) -> &str {
        &self.parameter_set
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The derived metric, `None` until the transformer has run.
    pub fn performance_index(&self) -> Option<f64> {
        self.performance_index
    }

    pub(crate) fn with_performance_index(mut self, index: f64) -> Self {
        self.performance_index = Some(index);
        self
    }

    /// String renderings of every field, in column order.
    ///
    /// Absent values render as the empty string.
    pub fn field_strings(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.timestamp.clone(),
            self.value.to_string(),
            self.parameter_set.clone(),
            self.status.clone(),
            self.performance_index.map(format_number).unwrap_or_default(),
        ]
    }
}
