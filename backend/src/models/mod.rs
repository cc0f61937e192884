//! Domain models for the allocation simulator

pub mod config;
pub mod curve;
pub mod estimate;
pub mod log;
pub mod organization;
pub mod scenario;

// Re-exports
pub use config::SimulationConfiguration;
pub use curve::{CurveError, UtilityCurve, UtilityGraphPoint};
pub use estimate::{estimates_from_points, EstimateSet, EstimatorEstimates, EstimatorId};
pub use log::{AllocationLog, AllocationLogEntry};
pub use organization::{OrgId, Organization};
pub use scenario::Scenario;
