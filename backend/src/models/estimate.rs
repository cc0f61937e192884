//! Estimator curve sets
//!
//! Each estimator supplies one [`UtilityCurve`] per organization they have an
//! opinion on. `BTreeMap` keys fix the enumeration order the engine relies
//! on: estimators take turns in ascending id order, and within a turn an
//! estimator's organizations are scanned (and utility ties broken) in
//! ascending org-id order. Ordering is part of the engine's contract, not an
//! accident of map iteration.

use std::collections::BTreeMap;

use crate::models::curve::{CurveError, UtilityCurve, UtilityGraphPoint};
use crate::models::organization::OrgId;

/// Opaque stable identifier for an estimator
pub type EstimatorId = String;

/// One estimator's curves, keyed by organization
pub type EstimatorEstimates = BTreeMap<OrgId, UtilityCurve>;

/// All estimators' curve sets, keyed by estimator id
pub type EstimateSet = BTreeMap<EstimatorId, EstimatorEstimates>;

/// Build a validated [`EstimateSet`] from raw per-organization point lists
///
/// Every point list passes through [`UtilityCurve::new`]; the first invalid
/// curve aborts the whole build. Estimators with no curves at all are kept
/// (the engine skips them round by round without error).
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use allocation_simulator_core_rs::models::curve::UtilityGraphPoint;
/// use allocation_simulator_core_rs::models::estimate::estimates_from_points;
///
/// let mut raw = BTreeMap::new();
/// let mut by_org = BTreeMap::new();
/// by_org.insert(1, vec![UtilityGraphPoint::new(0.0, 100.0)]);
/// raw.insert("alice".to_string(), by_org);
///
/// let estimates = estimates_from_points(raw).unwrap();
/// assert_eq!(estimates["alice"].len(), 1);
/// ```
pub fn estimates_from_points(
    raw: BTreeMap<EstimatorId, BTreeMap<OrgId, Vec<UtilityGraphPoint>>>,
) -> Result<EstimateSet, CurveError> {
    let mut estimates = EstimateSet::new();
    for (estimator_id, by_org) in raw {
        let mut curves = EstimatorEstimates::new();
        for (org_id, points) in by_org {
            curves.insert(org_id, UtilityCurve::new(points)?);
        }
        estimates.insert(estimator_id, curves);
    }
    Ok(estimates)
}
