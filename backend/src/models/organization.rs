//! Organization model
//!
//! A fundable organization as seen by the allocation engine: a stable
//! numeric id plus a display name. Organizations are created externally
//! and are immutable for the duration of a simulation run.

use serde::{Deserialize, Serialize};

/// Stable numeric identifier for an organization.
///
/// Ids are assigned by the data layer; the engine only requires that they
/// are unique within a run. All internal enumeration (allocation table,
/// tie-breaks) is in ascending `OrgId` order.
pub type OrgId = i64;

/// A candidate organization competing for budget
///
/// # Example
/// ```
/// use allocation_simulator_core_rs::models::organization::Organization;
///
/// let org = Organization::new(1, "Org 1");
/// assert_eq!(org.id, 1);
/// assert_eq!(org.name, "Org 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique, stable id
    pub id: OrgId,

    /// Display name used in allocation narratives
    pub name: String,
}

impl Organization {
    /// Create a new organization
    pub fn new(id: OrgId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
