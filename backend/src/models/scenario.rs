//! Scenario documents
//!
//! A scenario bundles everything one simulation run needs: the organization
//! list, every estimator's raw curve points, and a configuration. It is the
//! JSON shape consumed by the CLI and the FFI layer; the engine itself takes
//! already-validated inputs.
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "organizations": [{ "id": 1, "name": "Org 1" }],
//!   "estimates": {
//!     "alice": { "1": [{ "usd_amount": 0.0, "marginal_utility": 100.0 }] }
//!   },
//!   "configuration": { "total_dollars": 1000000.0, "num_chunks": 100 }
//! }
//! ```
//!
//! `configuration` may be omitted; the product default ($1M in 100 chunks)
//! applies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::config::SimulationConfiguration;
use crate::models::curve::{CurveError, UtilityGraphPoint};
use crate::models::estimate::{estimates_from_points, EstimateSet, EstimatorId};
use crate::models::organization::{OrgId, Organization};

/// Complete input for one simulation run, as supplied by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Candidate organizations
    pub organizations: Vec<Organization>,

    /// Raw curve points: estimator id -> org id -> knots
    pub estimates: BTreeMap<EstimatorId, BTreeMap<OrgId, Vec<UtilityGraphPoint>>>,

    /// Budget and chunk count; defaults to $1M in 100 chunks when omitted
    #[serde(default)]
    pub configuration: SimulationConfiguration,
}

impl Scenario {
    /// Parse a scenario from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate every raw point list into an [`EstimateSet`]
    ///
    /// The first malformed curve aborts the build; a malformed curve means
    /// corrupt input data, not a transient condition.
    pub fn build_estimates(&self) -> Result<EstimateSet, CurveError> {
        estimates_from_points(self.estimates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "organizations": [
            { "id": 1, "name": "Org 1" },
            { "id": 2, "name": "Org 2" }
        ],
        "estimates": {
            "alice": {
                "1": [
                    { "usd_amount": 0.0, "marginal_utility": 100.0 },
                    { "usd_amount": 500000.0, "marginal_utility": 0.0 }
                ],
                "2": [
                    { "usd_amount": 0.0, "marginal_utility": 50.0 }
                ]
            }
        },
        "configuration": { "total_dollars": 1000000.0, "num_chunks": 10 }
    }"#;

    #[test]
    fn test_parse_example() {
        let scenario = Scenario::from_json(EXAMPLE).unwrap();
        assert_eq!(scenario.organizations.len(), 2);
        assert_eq!(scenario.estimates["alice"].len(), 2);
        assert_eq!(scenario.configuration.num_chunks, 10);
    }

    #[test]
    fn test_missing_configuration_uses_default() {
        let scenario = Scenario::from_json(
            r#"{ "organizations": [], "estimates": {} }"#,
        )
        .unwrap();
        assert_eq!(scenario.configuration, SimulationConfiguration::default());
    }

    #[test]
    fn test_build_estimates_validates_curves() {
        let scenario = Scenario::from_json(EXAMPLE).unwrap();
        let estimates = scenario.build_estimates().unwrap();
        assert_eq!(estimates["alice"][&1].len(), 2);

        let bad = Scenario::from_json(
            r#"{
                "organizations": [{ "id": 1, "name": "Org 1" }],
                "estimates": { "alice": { "1": [] } }
            }"#,
        )
        .unwrap();
        assert_eq!(bad.build_estimates(), Err(CurveError::EmptyCurve));
    }

    #[test]
    fn test_round_trip() {
        let scenario = Scenario::from_json(EXAMPLE).unwrap();
        let json = serde_json::to_string(&scenario).unwrap();
        let back = Scenario::from_json(&json).unwrap();
        assert_eq!(scenario, back);
    }
}
