//! PyO3 wrapper for the allocation engine
//!
//! # Example (from Python)
//!
//! ```python
//! from allocation_simulator_core_rs import AllocationEngine
//!
//! scenario = {
//!     "organizations": [{"id": 1, "name": "Org 1"}, {"id": 2, "name": "Org 2"}],
//!     "estimates": {
//!         "alice": {
//!             1: [{"usd_amount": 0.0, "marginal_utility": 100.0},
//!                 {"usd_amount": 500_000.0, "marginal_utility": 0.0}],
//!             2: [{"usd_amount": 0.0, "marginal_utility": 50.0},
//!                 {"usd_amount": 500_000.0, "marginal_utility": 0.0}],
//!         },
//!     },
//!     "configuration": {"total_dollars": 500_000.0, "num_chunks": 10},
//! }
//!
//! engine = AllocationEngine.new(scenario)
//! result = engine.run()
//! for line in result["log"]:
//!     print(line["narrative"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::engine::allocator::AllocationEngine as RustEngine;
use crate::engine::fingerprint::result_fingerprint;

use super::types::{parse_scenario, result_to_py, round_result_to_py};

/// Python wrapper for the Rust allocation engine
///
/// One instance drives one simulation run; `run` consumes the engine.
#[pyclass(name = "AllocationEngine")]
pub struct PyAllocationEngine {
    inner: Option<RustEngine>,
}

#[pymethods]
impl PyAllocationEngine {
    /// Create an engine from a scenario dict
    ///
    /// Raises `ValueError` on malformed scenarios: missing keys, wrong
    /// types, invalid curves, unknown organizations, bad configuration.
    #[staticmethod]
    fn new(scenario: &Bound<'_, PyDict>) -> PyResult<Self> {
        let scenario = parse_scenario(scenario)?;

        let inner = RustEngine::from_scenario(scenario)
            .map_err(|e| PyValueError::new_err(format!("invalid scenario: {}", e)))?;

        Ok(PyAllocationEngine { inner: Some(inner) })
    }

    /// Execute a single round-robin pass over all estimators
    ///
    /// Returns a dict with `round`, `chunks_committed`, `funds_remaining`.
    fn round(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let engine = self
            .inner
            .as_mut()
            .ok_or_else(|| PyRuntimeError::new_err("engine already consumed by run()"))?;

        let round = engine
            .round()
            .map_err(|e| PyRuntimeError::new_err(format!("round failed: {}", e)))?;

        round_result_to_py(py, &round)
    }

    /// Run the simulation to completion and return the result dict
    ///
    /// Keys: `allocations` (org id -> dollars), `log` (list of dicts with a
    /// rendered `narrative`), `funds_remaining`, `rounds`, `partial`,
    /// `fingerprint`.
    fn run(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let engine = self
            .inner
            .take()
            .ok_or_else(|| PyRuntimeError::new_err("engine already consumed by run()"))?;

        let result = engine
            .run()
            .map_err(|e| PyRuntimeError::new_err(format!("simulation failed: {}", e)))?;

        let fingerprint = result_fingerprint(&result)
            .map_err(|e| PyRuntimeError::new_err(format!("fingerprint failed: {}", e)))?;

        let dict = result_to_py(py, &result)?;
        dict.bind(py).set_item("fingerprint", fingerprint)?;
        Ok(dict)
    }

    /// Budget not yet committed
    fn funds_remaining(&self) -> PyResult<f64> {
        self.inner
            .as_ref()
            .map(|e| e.funds_remaining())
            .ok_or_else(|| PyRuntimeError::new_err("engine already consumed by run()"))
    }

    /// Rounds executed so far
    fn rounds_run(&self) -> PyResult<usize> {
        self.inner
            .as_ref()
            .map(|e| e.rounds_run())
            .ok_or_else(|| PyRuntimeError::new_err("engine already consumed by run()"))
    }
}
