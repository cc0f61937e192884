//! Conversions between Python objects and engine types
//!
//! Scenario dicts are parsed field by field so error messages name the
//! offending key; results are converted to plain dicts and lists that need
//! no Rust types on the Python side.

use std::collections::BTreeMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::config::SimulationConfiguration;
use crate::models::curve::UtilityGraphPoint;
use crate::models::organization::{OrgId, Organization};
use crate::models::scenario::Scenario;
use crate::engine::allocator::{RoundResult, SimulationResult};

/// Parse a complete scenario from a Python dict
///
/// Expected shape (configuration optional):
///
/// ```python
/// {
///     "organizations": [{"id": 1, "name": "Org 1"}],
///     "estimates": {
///         "alice": {1: [{"usd_amount": 0.0, "marginal_utility": 100.0}]},
///     },
///     "configuration": {"total_dollars": 1_000_000.0, "num_chunks": 100},
/// }
/// ```
pub fn parse_scenario(dict: &Bound<'_, PyDict>) -> PyResult<Scenario> {
    let organizations = match dict.get_item("organizations")? {
        Some(value) => parse_organizations(&value)?,
        None => return Err(PyValueError::new_err("missing required key 'organizations'")),
    };

    let estimates = match dict.get_item("estimates")? {
        Some(value) => parse_estimates(&value)?,
        None => return Err(PyValueError::new_err("missing required key 'estimates'")),
    };

    let configuration = match dict.get_item("configuration")? {
        Some(value) => parse_configuration(&value)?,
        None => SimulationConfiguration::default(),
    };

    Ok(Scenario {
        organizations,
        estimates,
        configuration,
    })
}

fn parse_organizations(value: &Bound<'_, PyAny>) -> PyResult<Vec<Organization>> {
    let list = value
        .downcast::<PyList>()
        .map_err(|_| PyValueError::new_err("'organizations' must be a list"))?;

    let mut organizations = Vec::with_capacity(list.len());
    for item in list.iter() {
        let dict = item
            .downcast::<PyDict>()
            .map_err(|_| PyValueError::new_err("each organization must be a dict"))?;

        let id: OrgId = require(dict, "id")?
            .extract()
            .map_err(|_| PyValueError::new_err("organization 'id' must be an integer"))?;
        let name: String = require(dict, "name")?
            .extract()
            .map_err(|_| PyValueError::new_err("organization 'name' must be a string"))?;

        organizations.push(Organization::new(id, name));
    }

    Ok(organizations)
}

fn parse_estimates(
    value: &Bound<'_, PyAny>,
) -> PyResult<BTreeMap<String, BTreeMap<OrgId, Vec<UtilityGraphPoint>>>> {
    let dict = value
        .downcast::<PyDict>()
        .map_err(|_| PyValueError::new_err("'estimates' must be a dict"))?;

    let mut estimates = BTreeMap::new();
    for (estimator_key, by_org_value) in dict.iter() {
        let estimator_id: String = estimator_key
            .extract()
            .map_err(|_| PyValueError::new_err("estimator ids must be strings"))?;

        let by_org_dict = by_org_value.downcast::<PyDict>().map_err(|_| {
            PyValueError::new_err(format!(
                "estimates for '{}' must be a dict of org id to points",
                estimator_id
            ))
        })?;

        let mut by_org = BTreeMap::new();
        for (org_key, points_value) in by_org_dict.iter() {
            let org_id = parse_org_key(&org_key)?;
            by_org.insert(org_id, parse_points(&points_value, org_id)?);
        }

        estimates.insert(estimator_id, by_org);
    }

    Ok(estimates)
}

/// Org ids may arrive as Python ints or as string keys (e.g. from JSON)
fn parse_org_key(key: &Bound<'_, PyAny>) -> PyResult<OrgId> {
    if let Ok(id) = key.extract::<OrgId>() {
        return Ok(id);
    }
    if let Ok(text) = key.extract::<String>() {
        if let Ok(id) = text.parse::<OrgId>() {
            return Ok(id);
        }
    }
    Err(PyValueError::new_err(
        "organization keys must be integers or integer strings",
    ))
}

fn parse_points(value: &Bound<'_, PyAny>, org_id: OrgId) -> PyResult<Vec<UtilityGraphPoint>> {
    let list = value.downcast::<PyList>().map_err(|_| {
        PyValueError::new_err(format!("points for organization {} must be a list", org_id))
    })?;

    let mut points = Vec::with_capacity(list.len());
    for item in list.iter() {
        let dict = item
            .downcast::<PyDict>()
            .map_err(|_| PyValueError::new_err("each point must be a dict"))?;

        let usd_amount: f64 = require(dict, "usd_amount")?
            .extract()
            .map_err(|_| PyValueError::new_err("point 'usd_amount' must be a number"))?;
        let marginal_utility: f64 = require(dict, "marginal_utility")?
            .extract()
            .map_err(|_| PyValueError::new_err("point 'marginal_utility' must be a number"))?;

        points.push(UtilityGraphPoint::new(usd_amount, marginal_utility));
    }

    Ok(points)
}

fn parse_configuration(value: &Bound<'_, PyAny>) -> PyResult<SimulationConfiguration> {
    let dict = value
        .downcast::<PyDict>()
        .map_err(|_| PyValueError::new_err("'configuration' must be a dict"))?;

    let total_dollars: f64 = require(dict, "total_dollars")?
        .extract()
        .map_err(|_| PyValueError::new_err("'total_dollars' must be a number"))?;
    let num_chunks: usize = require(dict, "num_chunks")?
        .extract()
        .map_err(|_| PyValueError::new_err("'num_chunks' must be a positive integer"))?;

    Ok(SimulationConfiguration::new(total_dollars, num_chunks))
}

fn require<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Bound<'py, PyAny>> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("missing required key '{}'", key)))
}

/// Convert a simulation result to a Python dict
pub fn result_to_py(py: Python<'_>, result: &SimulationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    let allocations = PyDict::new_bound(py);
    for (org_id, amount) in &result.allocations {
        allocations.set_item(org_id, amount)?;
    }
    dict.set_item("allocations", allocations)?;

    let log = PyList::empty_bound(py);
    for entry in &result.log {
        let item = PyDict::new_bound(py);
        item.set_item("estimator_id", &entry.estimator_id)?;
        item.set_item("organization_id", entry.organization_id)?;
        item.set_item("organization_name", &entry.organization_name)?;
        item.set_item("allocation_amount", entry.allocation_amount)?;
        item.set_item("utility", entry.utility)?;
        item.set_item("narrative", entry.render())?;
        log.append(item)?;
    }
    dict.set_item("log", log)?;

    dict.set_item("funds_remaining", result.funds_remaining)?;
    dict.set_item("rounds", result.rounds)?;
    dict.set_item("partial", result.partial)?;

    Ok(dict.unbind())
}

/// Convert a single round's result to a Python dict
pub fn round_result_to_py(py: Python<'_>, round: &RoundResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("round", round.round)?;
    dict.set_item("chunks_committed", round.chunks_committed)?;
    dict.set_item("funds_remaining", round.funds_remaining)?;
    Ok(dict.unbind())
}
