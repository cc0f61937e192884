//! Allocation Engine
//!
//! The main simulation loop: a bounded iterative greedy allocation of a fixed
//! budget across organizations, driven by every estimator's marginal-utility
//! curves.
//!
//! # Algorithm
//!
//! ```text
//! For each round r (while funds remain, up to MAX_ROUNDS):
//! 1. Visit each estimator once, in ascending estimator-id order
//! 2. For each organization the estimator has a curve for, evaluate the
//!    marginal utility at that organization's current combined allocation
//! 3. Commit min(chunk, funds_remaining) to the strictly-best organization
//!    (first-seen, i.e. lowest org id, wins ties) and log the commit
//! 4. An estimator with no curves contributes nothing and is skipped
//! ```
//!
//! A round that commits nothing is a fixed point: allocations are unchanged,
//! so every later round would repeat it. The engine stops early in that case
//! with the same allocations and log it would otherwise reach at the round
//! ceiling.
//!
//! # Determinism
//!
//! Estimator and organization enumeration come from `BTreeMap` key order, so
//! fixed inputs produce byte-identical results. No randomness, no I/O, no
//! shared state across runs.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use allocation_simulator_core_rs::engine::AllocationEngine;
//! use allocation_simulator_core_rs::models::{
//!     Organization, SimulationConfiguration, UtilityCurve, UtilityGraphPoint,
//! };
//!
//! let orgs = vec![Organization::new(1, "Org 1"), Organization::new(2, "Org 2")];
//!
//! let mut curves = BTreeMap::new();
//! curves.insert(
//!     1,
//!     UtilityCurve::new(vec![
//!         UtilityGraphPoint::new(0.0, 100.0),
//!         UtilityGraphPoint::new(500_000.0, 0.0),
//!     ])
//!     .unwrap(),
//! );
//! curves.insert(
//!     2,
//!     UtilityCurve::new(vec![
//!         UtilityGraphPoint::new(0.0, 50.0),
//!         UtilityGraphPoint::new(500_000.0, 0.0),
//!     ])
//!     .unwrap(),
//! );
//! let mut estimates = BTreeMap::new();
//! estimates.insert("alice".to_string(), curves);
//!
//! let config = SimulationConfiguration::new(500_000.0, 10);
//! let result = AllocationEngine::new(orgs, estimates, config)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert!(!result.partial);
//! assert!(result.allocations[&1] > result.allocations[&2]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::config::SimulationConfiguration;
use crate::models::curve::CurveError;
use crate::models::estimate::{EstimateSet, EstimatorId};
use crate::models::log::{AllocationLog, AllocationLogEntry};
use crate::models::organization::{OrgId, Organization};
use crate::models::scenario::Scenario;

/// Hard ceiling on simulation rounds
///
/// Bounds worst-case runtime against pathological configurations. Reaching
/// it is not an error; the run stops with whatever has been allocated and
/// `partial` set on the result.
pub const MAX_ROUNDS: usize = 10_000;

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An estimate references an organization not in the run's list
    #[error("estimate references unknown organization {0}")]
    UnknownOrganization(OrgId),

    /// Curve validation or evaluation error, propagated unmodified
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Result canonicalization failed while fingerprinting
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result of a single round-robin pass over all estimators
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// Round number (1-based; the value after this round ran)
    pub round: usize,

    /// Chunks committed this round across all estimators
    pub chunks_committed: usize,

    /// Funds left after this round
    pub funds_remaining: f64,
}

/// Final output of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Final dollars per organization (every known org present, 0 if unfunded)
    pub allocations: BTreeMap<OrgId, f64>,

    /// One entry per committed chunk, in commit order
    pub log: AllocationLog,

    /// Dollars left unallocated when the run stopped
    pub funds_remaining: f64,

    /// Rounds executed
    pub rounds: usize,

    /// True when the run stopped with funds still unallocated (round ceiling
    /// hit, or no estimator could commit anything)
    pub partial: bool,
}

impl SimulationResult {
    /// Total dollars allocated across all organizations
    pub fn total_allocated(&self) -> f64 {
        self.allocations.values().sum()
    }

    /// Fraction of all allocated dollars a given organization received
    ///
    /// Zero when nothing was allocated or the organization is unknown.
    pub fn share_of(&self, org_id: OrgId) -> f64 {
        let total = self.total_allocated();
        if total <= 0.0 {
            return 0.0;
        }
        self.allocations.get(&org_id).copied().unwrap_or(0.0) / total
    }

    /// Per-organization totals broken down by estimator
    ///
    /// Every known organization appears, including unfunded ones with an
    /// empty inner map. Derived entirely from the log.
    pub fn breakdown(&self) -> BTreeMap<OrgId, BTreeMap<EstimatorId, f64>> {
        let mut breakdown: BTreeMap<OrgId, BTreeMap<EstimatorId, f64>> = self
            .allocations
            .keys()
            .map(|&org_id| (org_id, BTreeMap::new()))
            .collect();

        for entry in &self.log {
            *breakdown
                .entry(entry.organization_id)
                .or_default()
                .entry(entry.estimator_id.clone())
                .or_insert(0.0) += entry.allocation_amount;
        }

        breakdown
    }
}

/// One simulation run's worth of engine state
///
/// Constructed fresh per run and consumed by [`AllocationEngine::run`]; the
/// engine holds no state across calls. The allocation table and log are
/// exclusively owned, so `run` is pure from the caller's perspective.
#[derive(Debug)]
pub struct AllocationEngine {
    /// Org id -> display name (for log entries)
    org_names: BTreeMap<OrgId, String>,

    /// Every estimator's validated curves
    estimates: EstimateSet,

    /// Dollars committed per estimator turn
    chunk: f64,

    /// Running allocation per organization
    allocations: BTreeMap<OrgId, f64>,

    /// Budget not yet committed
    funds_remaining: f64,

    /// Rounds executed so far
    rounds_run: usize,

    /// Audit log, one entry per committed chunk
    log: AllocationLog,
}

impl AllocationEngine {
    /// Create an engine for one run
    ///
    /// # Errors
    ///
    /// * [`SimulationError::InvalidConfig`] - non-finite or negative budget,
    ///   zero chunks, or duplicate organization ids
    /// * [`SimulationError::UnknownOrganization`] - an estimate references an
    ///   organization missing from `organizations`
    pub fn new(
        organizations: Vec<Organization>,
        estimates: EstimateSet,
        configuration: SimulationConfiguration,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&configuration)?;

        let mut org_names = BTreeMap::new();
        for org in &organizations {
            if org_names.insert(org.id, org.name.clone()).is_some() {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate organization id {}",
                    org.id
                )));
            }
        }

        for curves in estimates.values() {
            for org_id in curves.keys() {
                if !org_names.contains_key(org_id) {
                    return Err(SimulationError::UnknownOrganization(*org_id));
                }
            }
        }

        let allocations = org_names.keys().map(|&id| (id, 0.0)).collect();

        Ok(Self {
            org_names,
            estimates,
            chunk: configuration.chunk_size(),
            allocations,
            funds_remaining: configuration.total_dollars,
            rounds_run: 0,
            log: AllocationLog::new(),
        })
    }

    /// Build an engine straight from a scenario document
    pub fn from_scenario(scenario: Scenario) -> Result<Self, SimulationError> {
        let estimates = scenario.build_estimates()?;
        Self::new(scenario.organizations, estimates, scenario.configuration)
    }

    fn validate_config(config: &SimulationConfiguration) -> Result<(), SimulationError> {
        if !config.total_dollars.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "total_dollars must be finite, got {}",
                config.total_dollars
            )));
        }

        if config.total_dollars < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "total_dollars must be >= 0, got {}",
                config.total_dollars
            )));
        }

        if config.num_chunks == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_chunks must be >= 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Execute one round-robin pass over all estimators
    ///
    /// Each estimator with at least one curve commits exactly one chunk,
    /// unless funds run out mid-round. Calling after funds are exhausted
    /// commits nothing and still counts the round.
    pub fn round(&mut self) -> Result<RoundResult, SimulationError> {
        let mut chunks_committed = 0;

        for (estimator_id, curves) in &self.estimates {
            if self.funds_remaining <= 0.0 {
                break;
            }

            let mut best: Option<(OrgId, f64)> = None;
            for (&org_id, curve) in curves {
                let current = self.allocations[&org_id];
                let utility = curve.utility_at(current)?;

                let better = match best {
                    None => true,
                    Some((_, best_utility)) => utility > best_utility,
                };
                if better {
                    best = Some((org_id, utility));
                }
            }

            if let Some((org_id, utility)) = best {
                let amount = self.chunk.min(self.funds_remaining);
                *self.allocations.entry(org_id).or_insert(0.0) += amount;
                self.funds_remaining -= amount;
                chunks_committed += 1;

                self.log.push(AllocationLogEntry {
                    estimator_id: estimator_id.clone(),
                    organization_id: org_id,
                    organization_name: self.org_names[&org_id].clone(),
                    allocation_amount: amount,
                    utility,
                });
            }
        }

        self.rounds_run += 1;

        Ok(RoundResult {
            round: self.rounds_run,
            chunks_committed,
            funds_remaining: self.funds_remaining,
        })
    }

    /// Run rounds until funds are exhausted, the round ceiling is reached,
    /// or a full round commits nothing
    pub fn run(mut self) -> Result<SimulationResult, SimulationError> {
        while self.funds_remaining > 0.0 && self.rounds_run < MAX_ROUNDS {
            let round = self.round()?;
            if round.chunks_committed == 0 {
                break;
            }
        }

        let partial = self.funds_remaining > 0.0;

        Ok(SimulationResult {
            allocations: self.allocations,
            log: self.log,
            funds_remaining: self.funds_remaining,
            rounds: self.rounds_run,
            partial,
        })
    }

    /// Running allocation table
    pub fn allocations(&self) -> &BTreeMap<OrgId, f64> {
        &self.allocations
    }

    /// Budget not yet committed
    pub fn funds_remaining(&self) -> f64 {
        self.funds_remaining
    }

    /// Rounds executed so far
    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// Audit log so far
    pub fn log(&self) -> &AllocationLog {
        &self.log
    }
}

/// Run a complete allocation in one call
///
/// Convenience wrapper over [`AllocationEngine::new`] + [`AllocationEngine::run`].
pub fn run_allocation(
    organizations: Vec<Organization>,
    estimates: EstimateSet,
    configuration: SimulationConfiguration,
) -> Result<SimulationResult, SimulationError> {
    AllocationEngine::new(organizations, estimates, configuration)?.run()
}
