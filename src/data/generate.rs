//! Sample data generation.
//!
//! Produces a raw `simulation_data.json` payload with the same mix of good and
//! degraded values seen in real exports: numeric, null and stray-string values.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

pub const PARAMETER_SETS: [&str; 4] = ["Alpha", "BetaSet", "Delta v2", "GammaSet"];
pub const STATUSES: [&str; 4] = ["completed", "running", "failed", "pending"];

/// Default number of generated entries.
pub const DEFAULT_COUNT: usize = 150;

/// Generate `count` raw entries, reproducible for a given seed.
pub fn generate(count: usize, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).single();

    (0..count)
        .map(|i| {
            let timestamp = base
                .map(|b| b + Duration::minutes(5 * i as i64))
                .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                .unwrap_or_default();

            let value = match rng.gen_range(0..3) {
                0 => {
                    let v: f64 = rng.gen_range(10.0..200.0);
                    json!((v * 100.0).round() / 100.0)
                }
                1 => Value::Null,
                _ => json!("invalid"),
            };

            json!({
                "id": format!("sim{:03}", i + 1),
                "timestamp": timestamp,
                "value": value,
                "parameter_set": PARAMETER_SETS.choose(&mut rng).copied().unwrap_or("Alpha"),
                "status": STATUSES.choose(&mut rng).copied().unwrap_or("pending"),
            })
        })
        .collect()
}
