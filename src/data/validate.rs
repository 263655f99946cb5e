//! Structural validation of raw candidates.
//!
//! Only shape is checked: `status` is not matched against the known set and
//! `timestamp` is not required to parse. Both degrade later instead.

use serde_json::{Map, Value};
use tracing::debug;

use super::record::{RecordValue, SimulationRecord};
use crate::error::Rejection;

/// Validate a single raw candidate.
pub fn validate(candidate: &Value) -> Result<SimulationRecord, Rejection> {
    let obj = candidate.as_object().ok_or(Rejection::NotAnObject)?;

    let id = string_field(obj, "id")?;
    let timestamp = string_field(obj, "timestamp")?;
    let value = value_field(obj)?;
    let parameter_set = string_field(obj, "parameter_set")?;
    let status = string_field(obj, "status")?;

    Ok(SimulationRecord::new(
        id,
        timestamp,
        value,
        parameter_set,
        status,
    ))
}

/// Keep the structurally valid candidates, in input order.
///
/// Rejected candidates are dropped silently; only a summary count is logged.
pub fn validate_all(candidates: &[Value]) -> Vec<SimulationRecord> {
    let records: Vec<SimulationRecord> =
        candidates.iter().filter_map(|c| validate(c).ok()).collect();

    let rejected = candidates.len() - records.len();
    if rejected > 0 {
        debug!(rejected, accepted = records.len(), "dropped malformed candidates");
    }
    records
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, Rejection> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Rejection::WrongType {
            field,
            expected: "a string",
        }),
        None => Err(Rejection::MissingField(field)),
    }
}

fn value_field(obj: &Map<String, Value>) -> Result<RecordValue, Rejection> {
    match obj.get("value") {
        None | Some(Value::Null) => Ok(RecordValue::Absent),
        Some(Value::String(s)) => Ok(RecordValue::Text(s.clone())),
        Some(Value::Number(n)) => n.as_f64().map(RecordValue::Number).ok_or(Rejection::WrongType {
            field: "value",
            expected: "a finite number",
        }),
        Some(_) => Err(Rejection::WrongType {
            field: "value",
            expected: "a number, null or a string",
        }),
    }
}
