//! Simulation configuration
//!
//! The caller supplies a total budget and the number of chunks it is split
//! into; one chunk is committed per estimator turn. Validation happens when
//! the engine is constructed, not here.

use serde::{Deserialize, Serialize};

/// Budget and granularity for one simulation run
///
/// `chunk_size` is `total_dollars / num_chunks`. More chunks means a slower
/// but finer-grained allocation.
///
/// # Example
/// ```
/// use allocation_simulator_core_rs::models::config::SimulationConfiguration;
///
/// let config = SimulationConfiguration::new(1_000_000.0, 10);
/// assert_eq!(config.chunk_size(), 100_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfiguration {
    /// Total budget to allocate across all organizations (USD)
    pub total_dollars: f64,

    /// Number of chunks the budget is divided into (>= 1)
    pub num_chunks: usize,
}

impl SimulationConfiguration {
    /// Create a new configuration
    pub fn new(total_dollars: f64, num_chunks: usize) -> Self {
        Self {
            total_dollars,
            num_chunks,
        }
    }

    /// Dollar amount committed per estimator turn
    pub fn chunk_size(&self) -> f64 {
        self.total_dollars / self.num_chunks as f64
    }
}

impl Default for SimulationConfiguration {
    fn default() -> Self {
        Self {
            total_dollars: 1_000_000.0,
            num_chunks: 100,
        }
    }
}
