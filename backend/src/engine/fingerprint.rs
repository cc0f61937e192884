//! Result fingerprinting
//!
//! A fingerprint is the SHA-256 hash of a value's canonical JSON form
//! (object keys recursively sorted). Two runs with identical inputs produce
//! identical fingerprints, so regression tests and the CLI can compare runs
//! without diffing full logs.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::engine::allocator::{SimulationError, SimulationResult};

/// Compute the deterministic SHA-256 fingerprint of any serializable value
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on serialization-time key order.
///
/// # Example
///
/// ```
/// use allocation_simulator_core_rs::engine::fingerprint::fingerprint;
///
/// let a = fingerprint(&("alice", 42)).unwrap();
/// let b = fingerprint(&("alice", 42)).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value)
        .map_err(|e| SimulationError::Serialization(format!("serialization failed: {}", e)))?;

    // Recursively sort all object keys for a canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(value);

    let json = serde_json::to_string(&canonical)
        .map_err(|e| SimulationError::Serialization(format!("serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Fingerprint of a complete simulation result
pub fn result_fingerprint(result: &SimulationResult) -> Result<String, SimulationError> {
    fingerprint(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestValue {
        total: f64,
        name: String,
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = TestValue {
            total: 1_000_000.0,
            name: "run".to_string(),
        };
        let b = TestValue {
            total: 1_000_000.0,
            name: "run".to_string(),
        };

        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_fingerprint_differs_for_different_values() {
        let a = TestValue {
            total: 1_000_000.0,
            name: "run".to_string(),
        };
        let b = TestValue {
            total: 1_000_001.0,
            name: "run".to_string(),
        };

        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let hash = fingerprint(&42).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
