//! Allocation engine.
//!
//! `IpManager` owns one pool and one cursor per plane for a single planning
//! run. Cursors only move forward: every draw request advances the cursor of
//! its plane by one, whether or not an address was available, so the cursor
//! always equals the number of requests made. Draws past the end of a pool
//! are legal and return the pending sentinel.
//!
//! An engine is not shared between runs. Each plan generation constructs its
//! own engine from the range text.

use super::pool::{AddressPool, Plane};
use super::range::validate_list;
use super::report::{
    utilization, PlaneUsageDetail, PoolUsage, Requirement, Requirements, UsageReport, UsageSummary,
    HIGH_UTILIZATION_PERCENT, LOW_REMAINING_THRESHOLD,
};
use super::slot::AddressSlot;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Raw range text for the four planes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRanges {
    pub management: String,
    pub business: String,
    pub storage_public: String,
    pub storage_cluster: String,
}

impl IpRanges {
    pub fn get(&self, plane: Plane) -> &str {
        match plane {
            Plane::Management => &self.management,
            Plane::Business => &self.business,
            Plane::StoragePublic => &self.storage_public,
            Plane::StorageCluster => &self.storage_cluster,
        }
    }
}

/// Parse errors collected for one plane while building its pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorRecord {
    pub plane: Plane,
    pub raw_errors: Vec<String>,
}

/// Snapshot of every plane's cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaneCursors {
    pub management: u64,
    pub business: u64,
    pub storage_public: u64,
    pub storage_cluster: u64,
}

impl PlaneCursors {
    pub fn get(&self, plane: Plane) -> u64 {
        match plane {
            Plane::Management => self.management,
            Plane::Business => self.business,
            Plane::StoragePublic => self.storage_public,
            Plane::StorageCluster => self.storage_cluster,
        }
    }
}

/// Per-run IP allocation engine
#[derive(Debug, Clone)]
pub struct IpManager {
    pools: [AddressPool; 4],
    cursors: [u64; 4],
    combined_network: bool,
    validation_errors: Vec<ValidationErrorRecord>,
}

impl IpManager {
    /// Build the four pools from their range text.
    ///
    /// Management and both storage planes are always validated. In combined
    /// network mode the business text is ignored entirely: the business pool
    /// is empty and nothing in that text can produce a validation error.
    pub fn new(ranges: &IpRanges, combined_network: bool) -> Self {
        let mut validation_errors = Vec::new();

        let pools = Plane::ALL.map(|plane| {
            if plane == Plane::Business && combined_network {
                if !ranges.business.trim().is_empty() {
                    info!("Combined network mode: ignoring business range '{}'", ranges.business.trim());
                }
                return AddressPool::empty(plane);
            }

            let parsed = validate_list(ranges.get(plane));
            if parsed.has_errors() {
                validation_errors.push(ValidationErrorRecord {
                    plane,
                    raw_errors: parsed.errors,
                });
            }
            AddressPool::new(plane, parsed.addresses)
        });

        for pool in &pools {
            info!("{} pool: {} addresses", pool.plane().label(), pool.len());
        }

        Self {
            pools,
            cursors: [0; 4],
            combined_network,
            validation_errors,
        }
    }

    pub fn is_combined_network(&self) -> bool {
        self.combined_network
    }

    pub fn pool(&self, plane: Plane) -> &AddressPool {
        &self.pools[plane.index()]
    }

    pub fn has_validation_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// Validation errors flattened to one message each, prefixed by plane.
    ///
    /// The engine does not refuse draws when this is non-empty; callers must
    /// check it before generating anything.
    pub fn validation_errors(&self) -> Vec<String> {
        self.validation_errors
            .iter()
            .flat_map(|record| {
                record
                    .raw_errors
                    .iter()
                    .map(move |err| format!("{}: {}", record.plane.label(), err))
            })
            .collect()
    }

    pub fn validation_records(&self) -> &[ValidationErrorRecord] {
        &self.validation_errors
    }

    /// One warning per pair of planes whose pools share addresses.
    ///
    /// Cursors are per plane, so a shared address can end up on two
    /// entities, once on each plane.
    pub fn cross_plane_overlaps(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (i, pool) in self.pools.iter().enumerate() {
            for other in &self.pools[i + 1..] {
                let shared = pool.addresses().overlap(other.addresses());
                if let Some(first) = shared.first() {
                    warnings.push(format!(
                        "{} and {} ranges share {} addresses (first {}); each plane assigns them independently",
                        pool.plane().label(),
                        other.plane().label().to_lowercase(),
                        shared.len(),
                        first
                    ));
                }
            }
        }
        warnings
    }

    /// Draw the next address of a plane.
    ///
    /// Always advances the cursor. Returns `Pending` for an empty or
    /// exhausted pool.
    pub fn next_address(&mut self, plane: Plane) -> AddressSlot {
        let idx = plane.index();
        let position = self.cursors[idx];
        self.cursors[idx] += 1;

        match self.pools[idx].get(position) {
            Some(addr) => {
                debug!("Allocated {} from {} (draw #{})", addr, plane, position + 1);
                AddressSlot::Concrete(addr)
            }
            None => {
                debug!("{} has no address for draw #{}", plane.label(), position + 1);
                AddressSlot::Pending
            }
        }
    }

    /// Draw by plane name. An unknown name returns `Pending` and moves no
    /// cursor.
    pub fn next_address_by_name(&mut self, plane: &str) -> AddressSlot {
        match plane.parse::<Plane>() {
            Ok(plane) => self.next_address(plane),
            Err(e) => {
                debug!("{}", e);
                AddressSlot::Pending
            }
        }
    }

    /// Draw `count` addresses in order through `next_address`
    pub fn allocate_many(&mut self, plane: Plane, count: usize) -> Vec<AddressSlot> {
        (0..count).map(|_| self.next_address(plane)).collect()
    }

    pub fn cursor(&self, plane: Plane) -> u64 {
        self.cursors[plane.index()]
    }

    pub fn cursors(&self) -> PlaneCursors {
        PlaneCursors {
            management: self.cursor(Plane::Management),
            business: self.cursor(Plane::Business),
            storage_public: self.cursor(Plane::StoragePublic),
            storage_cluster: self.cursor(Plane::StorageCluster),
        }
    }

    /// Rewind every cursor to zero so a run can be replayed.
    ///
    /// Generation never calls this; it exists for tests and replay tooling.
    pub fn reset_cursors(&mut self) {
        self.cursors = [0; 4];
    }

    pub fn usage(&self, plane: Plane) -> PoolUsage {
        let total = self.pool(plane).len();
        let requested = self.cursor(plane);
        let used = requested.min(total);
        PoolUsage {
            total,
            used,
            remaining: total - used,
            requested,
        }
    }

    /// Compare requirements with pool sizes; one warning per short plane
    pub fn check_sufficiency(&self, requirements: &Requirements) -> Vec<String> {
        let mut warnings = Vec::new();
        for (plane, requirement) in requirements.iter() {
            let needed = requirement.total();
            let available = self.pool(plane).len();
            if needed <= available {
                continue;
            }
            let breakdown = match requirement {
                Requirement::Split { server, vm } => format!(" (servers: {}, VMs: {})", server, vm),
                Requirement::Count(_) => String::new(),
            };
            warnings.push(format!(
                "{} needs {} addresses{} but only {} are configured, short by {}",
                plane.label(),
                needed,
                breakdown,
                available,
                needed - available
            ));
        }
        warnings
    }

    /// Per-plane utilization with threshold warnings.
    ///
    /// High utilization and low remaining count are separate warnings and
    /// can both fire for the same plane. Planes with an empty pool get no
    /// threshold warnings, only a pending notice when draws were refused.
    pub fn usage_report(&self) -> UsageReport {
        let mut details = Vec::with_capacity(Plane::ALL.len());
        let mut warnings = Vec::new();

        for plane in Plane::ALL {
            let usage = self.usage(plane);
            let percent = usage.utilization_percent();

            if usage.total > 0 {
                if percent > HIGH_UTILIZATION_PERCENT {
                    warnings.push(format!(
                        "{} utilization is {:.1}% ({}/{}), above {}%",
                        plane.label(),
                        percent,
                        usage.used,
                        usage.total,
                        HIGH_UTILIZATION_PERCENT
                    ));
                }
                if usage.remaining < LOW_REMAINING_THRESHOLD {
                    warnings.push(format!(
                        "{} has only {} addresses remaining",
                        plane.label(),
                        usage.remaining
                    ));
                }
            }
            if usage.pending() > 0 {
                warnings.push(format!(
                    "{}: {} address requests could not be served and are marked pending",
                    plane.label(),
                    usage.pending()
                ));
            }

            details.push(PlaneUsageDetail {
                plane,
                total: usage.total,
                used: usage.used,
                remaining: usage.remaining,
                requested: usage.requested,
                pending: usage.pending(),
                utilization_percent: percent,
            });
        }

        let total: u64 = details.iter().map(|d| d.total).sum();
        let used: u64 = details.iter().map(|d| d.used).sum();
        let pending: u64 = details.iter().map(|d| d.pending).sum();
        let summary = UsageSummary {
            total,
            used,
            remaining: total - used,
            pending,
            utilization_percent: utilization(used, total),
        };

        UsageReport {
            summary,
            details,
            warnings,
        }
    }
}
