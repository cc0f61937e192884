//! Python FFI layer (feature `pyo3`)
//!
//! Exposes the allocation engine to Python. The boundary is minimal: a
//! scenario-shaped dict in, a result dict out. All validation errors
//! surface as `ValueError`, internal failures as `RuntimeError`.

pub mod engine;
pub mod types;
