//! Requirement, usage and utilization report types.

use super::pool::Plane;
use serde::{Deserialize, Serialize};

/// Utilization above this percentage produces a warning
pub const HIGH_UTILIZATION_PERCENT: f64 = 90.0;

/// Fewer remaining addresses than this produces a warning
pub const LOW_REMAINING_THRESHOLD: u64 = 5;

/// Number of addresses a plane needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// Plain count
    Count(u64),
    /// Separate server and VM demand, summed for comparison
    Split { server: u64, vm: u64 },
}

impl Requirement {
    pub fn total(&self) -> u64 {
        match *self {
            Requirement::Count(n) => n,
            Requirement::Split { server, vm } => server + vm,
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Requirement::Count(0)
    }
}

/// Address demand for every plane of a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub management: Requirement,
    pub business: Requirement,
    pub storage_public: Requirement,
    pub storage_cluster: Requirement,
}

impl Requirements {
    pub fn get(&self, plane: Plane) -> Requirement {
        match plane {
            Plane::Management => self.management,
            Plane::Business => self.business,
            Plane::StoragePublic => self.storage_public,
            Plane::StorageCluster => self.storage_cluster,
        }
    }

    /// Requirements in canonical plane order
    pub fn iter(&self) -> impl Iterator<Item = (Plane, Requirement)> + '_ {
        Plane::ALL.into_iter().map(move |plane| (plane, self.get(plane)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, req)| req.total()).sum()
    }
}

/// Point-in-time usage of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolUsage {
    /// Addresses in the pool
    pub total: u64,
    /// Addresses handed out; never exceeds `total`
    pub used: u64,
    /// `total - used`
    pub remaining: u64,
    /// Draw requests made, including those answered with the pending sentinel
    pub requested: u64,
}

impl PoolUsage {
    /// Requests that could not be served
    pub fn pending(&self) -> u64 {
        self.requested - self.used
    }

    /// Percentage of the pool in use, rounded to one decimal place
    pub fn utilization_percent(&self) -> f64 {
        utilization(self.used, self.total)
    }
}

/// Per-plane line of the usage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneUsageDetail {
    pub plane: Plane,
    pub total: u64,
    pub used: u64,
    pub remaining: u64,
    pub requested: u64,
    pub pending: u64,
    pub utilization_percent: f64,
}

/// Aggregate over all planes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total: u64,
    pub used: u64,
    pub remaining: u64,
    pub pending: u64,
    pub utilization_percent: f64,
}

/// Utilization report for a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    pub summary: UsageSummary,
    pub details: Vec<PlaneUsageDetail>,
    pub warnings: Vec<String>,
}

impl UsageReport {
    pub fn detail(&self, plane: Plane) -> Option<&PlaneUsageDetail> {
        self.details.iter().find(|d| d.plane == plane)
    }
}

pub(crate) fn utilization(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = used as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}
