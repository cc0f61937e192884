//! Determinism Tests
//!
//! The engine has no RNG and no I/O: fixed inputs plus the fixed
//! enumeration order (ascending estimator and org ids) must reproduce the
//! result exactly, down to the fingerprint. Regression suites rely on this
//! to freeze known-good runs.

use allocation_simulator_core_rs::{
    result_fingerprint, run_allocation, EstimateSet, EstimatorEstimates, Organization,
    SimulationConfiguration, UtilityCurve, UtilityGraphPoint,
};

fn fixture_estimates() -> EstimateSet {
    let mut alice = EstimatorEstimates::new();
    alice.insert(
        1,
        UtilityCurve::new(vec![
            UtilityGraphPoint::new(0.0, 100.0),
            UtilityGraphPoint::new(500_000.0, 50.0),
            UtilityGraphPoint::new(1_000_000.0, 20.0),
        ])
        .unwrap(),
    );
    alice.insert(
        2,
        UtilityCurve::new(vec![
            UtilityGraphPoint::new(0.0, 80.0),
            UtilityGraphPoint::new(750_000.0, 10.0),
        ])
        .unwrap(),
    );

    let mut bob = EstimatorEstimates::new();
    bob.insert(
        2,
        UtilityCurve::new(vec![
            UtilityGraphPoint::new(0.0, 95.0),
            UtilityGraphPoint::new(600_000.0, 5.0),
        ])
        .unwrap(),
    );

    let mut set = EstimateSet::new();
    set.insert("alice".to_string(), alice);
    set.insert("bob".to_string(), bob);
    set
}

fn fixture_orgs() -> Vec<Organization> {
    vec![Organization::new(1, "Org 1"), Organization::new(2, "Org 2")]
}

#[test]
fn test_identical_inputs_produce_identical_results() {
    let config = SimulationConfiguration::new(1_000_000.0, 40);

    let first = run_allocation(fixture_orgs(), fixture_estimates(), config).unwrap();
    let second = run_allocation(fixture_orgs(), fixture_estimates(), config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_identical_runs_share_a_fingerprint() {
    let config = SimulationConfiguration::new(1_000_000.0, 40);

    let first = run_allocation(fixture_orgs(), fixture_estimates(), config).unwrap();
    let second = run_allocation(fixture_orgs(), fixture_estimates(), config).unwrap();

    assert_eq!(
        result_fingerprint(&first).unwrap(),
        result_fingerprint(&second).unwrap()
    );
}

#[test]
fn test_different_configurations_change_the_fingerprint() {
    let coarse = run_allocation(
        fixture_orgs(),
        fixture_estimates(),
        SimulationConfiguration::new(1_000_000.0, 10),
    )
    .unwrap();
    let fine = run_allocation(
        fixture_orgs(),
        fixture_estimates(),
        SimulationConfiguration::new(1_000_000.0, 40),
    )
    .unwrap();

    assert_ne!(
        result_fingerprint(&coarse).unwrap(),
        result_fingerprint(&fine).unwrap()
    );
}

#[test]
fn test_json_round_trip_preserves_the_result_exactly() {
    let config = SimulationConfiguration::new(1_000_000.0, 40);
    let result = run_allocation(fixture_orgs(), fixture_estimates(), config).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: allocation_simulator_core_rs::SimulationResult =
        serde_json::from_str(&json).unwrap();

    assert_eq!(result, back);
    assert_eq!(
        result_fingerprint(&result).unwrap(),
        result_fingerprint(&back).unwrap()
    );
}
