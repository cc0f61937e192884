//! Allocation engine - main simulation loop
//!
//! Implements the round-robin greedy allocation over estimator utility
//! curves, plus deterministic result fingerprinting.
//!
//! See `allocator.rs` for the full algorithm.

pub mod allocator;
pub mod fingerprint;

// Re-export main types for convenience
pub use allocator::{
    run_allocation, AllocationEngine, RoundResult, SimulationError, SimulationResult, MAX_ROUNDS,
};
pub use fingerprint::{fingerprint as value_fingerprint, result_fingerprint};
