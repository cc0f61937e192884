//! Budget Allocation Simulator - Rust Engine
//!
//! Deterministic greedy allocation of a fixed budget across organizations,
//! driven by per-estimator marginal-utility curves.
//!
//! # Architecture
//!
//! - **models**: Domain types (Organization, UtilityCurve, AllocationLog, Scenario)
//! - **engine**: Round-robin greedy allocation loop and result fingerprinting
//!
//! # Critical Invariants
//!
//! 1. Enumeration order is explicit: estimators and organizations are always
//!    visited in ascending id order (`BTreeMap` keys)
//! 2. Fixed inputs produce byte-identical results (no RNG, no I/O)
//! 3. A malformed curve aborts the whole run; nothing is silently excluded
//! 4. The engine holds no state across runs
//!
//! # Example
//!
//! ```
//! use allocation_simulator_core_rs::{AllocationEngine, Scenario};
//!
//! let scenario = Scenario::from_json(
//!     r#"{
//!         "organizations": [
//!             { "id": 1, "name": "Org 1" },
//!             { "id": 2, "name": "Org 2" }
//!         ],
//!         "estimates": {
//!             "alice": {
//!                 "1": [
//!                     { "usd_amount": 0.0, "marginal_utility": 100.0 },
//!                     { "usd_amount": 500000.0, "marginal_utility": 0.0 }
//!                 ],
//!                 "2": [
//!                     { "usd_amount": 0.0, "marginal_utility": 50.0 },
//!                     { "usd_amount": 500000.0, "marginal_utility": 0.0 }
//!                 ]
//!             }
//!         },
//!         "configuration": { "total_dollars": 500000.0, "num_chunks": 10 }
//!     }"#,
//! )
//! .unwrap();
//!
//! let result = AllocationEngine::from_scenario(scenario).unwrap().run().unwrap();
//! assert!(result.allocations[&1] > result.allocations[&2]);
//! ```

// Module declarations
pub mod engine;
pub mod models;

// Re-exports for convenience
pub use engine::{
    result_fingerprint, run_allocation, AllocationEngine, RoundResult, SimulationError,
    SimulationResult, MAX_ROUNDS,
};
pub use models::{
    estimates_from_points, AllocationLog, AllocationLogEntry, CurveError, EstimateSet,
    EstimatorEstimates, EstimatorId, OrgId, Organization, Scenario, SimulationConfiguration,
    UtilityCurve, UtilityGraphPoint,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn allocation_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyAllocationEngine>()?;
    Ok(())
}
