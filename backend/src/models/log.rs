//! Allocation log
//!
//! Every committed chunk appends one immutable [`AllocationLogEntry`], in
//! commit order. The log is the complete audit trail of a run: who allocated
//! what to whom, and the marginal utility that won the comparison.
//!
//! # Example
//!
//! ```
//! use allocation_simulator_core_rs::models::log::{AllocationLog, AllocationLogEntry};
//!
//! let mut log = AllocationLog::new();
//! log.push(AllocationLogEntry {
//!     estimator_id: "alice".to_string(),
//!     organization_id: 1,
//!     organization_name: "Org 1".to_string(),
//!     allocation_amount: 10_000.0,
//!     utility: 100.0,
//! });
//!
//! assert_eq!(log.len(), 1);
//! assert_eq!(
//!     log.entries()[0].render(),
//!     "Allocated $10000.00 to Org 1 with utility 100.00 (Estimator alice)"
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::models::estimate::EstimatorId;
use crate::models::organization::OrgId;

/// One committed chunk: estimator, organization, amount, winning utility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLogEntry {
    /// Estimator whose turn committed the chunk
    pub estimator_id: EstimatorId,

    /// Organization that received the chunk
    pub organization_id: OrgId,

    /// Organization name at commit time (for rendering without a lookup)
    pub organization_name: String,

    /// Dollars committed (the chunk size, or the final remainder)
    pub allocation_amount: f64,

    /// Marginal utility that won the comparison for this chunk
    pub utility: f64,
}

impl AllocationLogEntry {
    /// Narrative form shown to users, one line per committed chunk
    pub fn render(&self) -> String {
        format!(
            "Allocated ${:.2} to {} with utility {:.2} (Estimator {})",
            self.allocation_amount, self.organization_name, self.utility, self.estimator_id
        )
    }
}

/// Ordered sequence of log entries for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationLog {
    entries: Vec<AllocationLogEntry>,
}

impl AllocationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: AllocationLogEntry) {
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in commit order
    pub fn entries(&self) -> &[AllocationLogEntry] {
        &self.entries
    }

    /// Entries that committed to a specific organization
    pub fn entries_for_org(&self, org_id: OrgId) -> Vec<&AllocationLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.organization_id == org_id)
            .collect()
    }

    /// Entries committed by a specific estimator
    pub fn entries_for_estimator(&self, estimator_id: &str) -> Vec<&AllocationLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.estimator_id == estimator_id)
            .collect()
    }

    /// Narrative lines, in commit order
    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(AllocationLogEntry::render).collect()
    }
}

impl<'a> IntoIterator for &'a AllocationLog {
    type Item = &'a AllocationLogEntry;
    type IntoIter = std::slice::Iter<'a, AllocationLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
