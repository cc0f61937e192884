//! Property Tests - Budget Conservation
//!
//! Over randomized scenarios where every estimator holds a valid curve for
//! every organization, the greedy loop must allocate the entire budget
//! (within float accumulation error), never produce a negative allocation,
//! and reproduce itself exactly on a second run.

use std::collections::BTreeMap;

use proptest::prelude::*;

use allocation_simulator_core_rs::{
    run_allocation, EstimateSet, EstimatorEstimates, Organization, SimulationConfiguration,
    UtilityCurve, UtilityGraphPoint,
};

const NUM_ORGS: i64 = 3;

/// Random curve anchored at $0 with strictly increasing knots
fn curve_strategy() -> impl Strategy<Value = UtilityCurve> {
    (
        -100.0f64..100.0,
        prop::collection::vec((1.0f64..500_000.0, -100.0f64..100.0), 0..4),
    )
        .prop_map(|(mu_at_zero, gaps)| {
            let mut points = vec![UtilityGraphPoint::new(0.0, mu_at_zero)];
            let mut usd = 0.0;
            for (gap, mu) in gaps {
                usd += gap;
                points.push(UtilityGraphPoint::new(usd, mu));
            }
            UtilityCurve::new(points).expect("strictly increasing by construction")
        })
}

/// 1..=3 estimators, each with a curve for every organization
fn estimate_set_strategy() -> impl Strategy<Value = EstimateSet> {
    prop::collection::vec(
        prop::collection::vec(curve_strategy(), NUM_ORGS as usize),
        1..4,
    )
    .prop_map(|per_estimator| {
        let mut set = EstimateSet::new();
        for (e, curves) in per_estimator.into_iter().enumerate() {
            let mut by_org = EstimatorEstimates::new();
            for (o, curve) in curves.into_iter().enumerate() {
                by_org.insert(o as i64 + 1, curve);
            }
            set.insert(format!("estimator{}", e + 1), by_org);
        }
        set
    })
}

fn organizations() -> Vec<Organization> {
    (1..=NUM_ORGS)
        .map(|id| Organization::new(id, format!("Org {}", id)))
        .collect()
}

proptest! {
    #[test]
    fn budget_is_conserved(
        estimates in estimate_set_strategy(),
        total in 0.0f64..10_000_000.0,
        num_chunks in 1usize..200,
    ) {
        let config = SimulationConfiguration::new(total, num_chunks);
        let result = run_allocation(organizations(), estimates, config).unwrap();

        // Every estimator can always commit, so the run never stalls and
        // never comes close to the round ceiling.
        prop_assert!(!result.partial);
        prop_assert_eq!(result.funds_remaining, 0.0);

        let tolerance = 1e-6 * total.max(1.0);
        prop_assert!((result.total_allocated() - total).abs() <= tolerance);
    }

    #[test]
    fn allocations_are_never_negative(
        estimates in estimate_set_strategy(),
        total in 0.0f64..10_000_000.0,
        num_chunks in 1usize..200,
    ) {
        let config = SimulationConfiguration::new(total, num_chunks);
        let result = run_allocation(organizations(), estimates, config).unwrap();

        for (&org_id, &amount) in &result.allocations {
            prop_assert!(amount >= 0.0, "org {} got {}", org_id, amount);
        }
    }

    #[test]
    fn log_amounts_reconcile_with_allocations(
        estimates in estimate_set_strategy(),
        total in 0.0f64..10_000_000.0,
        num_chunks in 1usize..200,
    ) {
        let config = SimulationConfiguration::new(total, num_chunks);
        let result = run_allocation(organizations(), estimates, config).unwrap();

        let tolerance = 1e-6 * total.max(1.0);

        // Per-organization log totals match the allocation table.
        let mut from_log: BTreeMap<i64, f64> = BTreeMap::new();
        for entry in &result.log {
            *from_log.entry(entry.organization_id).or_insert(0.0) += entry.allocation_amount;
        }
        for (&org_id, &amount) in &result.allocations {
            let logged = from_log.get(&org_id).copied().unwrap_or(0.0);
            prop_assert!((logged - amount).abs() <= tolerance);
        }
    }

    #[test]
    fn identical_inputs_reproduce_identical_results(
        estimates in estimate_set_strategy(),
        total in 0.0f64..10_000_000.0,
        num_chunks in 1usize..200,
    ) {
        let config = SimulationConfiguration::new(total, num_chunks);

        let first = run_allocation(organizations(), estimates.clone(), config).unwrap();
        let second = run_allocation(organizations(), estimates, config).unwrap();

        prop_assert_eq!(first, second);
    }
}
