//! Plan entity types.
//!
//! Everything here is created once by a generator and never mutated after
//! it has been appended to a plan.

use crate::catalog::{ServerModel, ServerRole, VmFlavor, VmRole};
use crate::config::{DeploymentParams, RedundancyPolicy};
use crate::ip::{AddressSlot, IpManager, Plane, PlaneCursors, Requirements, UsageReport};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Generation stages, in the order they must run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStage {
    Servers,
    VirtualMachines,
    StorageClusters,
}

impl PlanStage {
    /// Stage that must have finished before this one may start
    pub fn previous(self) -> Option<PlanStage> {
        match self {
            PlanStage::Servers => None,
            PlanStage::VirtualMachines => Some(PlanStage::Servers),
            PlanStage::StorageClusters => Some(PlanStage::VirtualMachines),
        }
    }
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanStage::Servers => "servers",
            PlanStage::VirtualMachines => "virtual machines",
            PlanStage::StorageClusters => "storage clusters",
        };
        f.write_str(name)
    }
}

/// Cursor positions observed right after a stage finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub stage: PlanStage,
    pub cursors_after: PlaneCursors,
}

/// Physical server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub name: String,
    pub role: ServerRole,
    pub model: ServerModel,
    pub management: AddressSlot,
    pub business: AddressSlot,
    pub storage_public: AddressSlot,
    pub storage_cluster: AddressSlot,
}

impl Server {
    pub fn slot(&self, plane: Plane) -> AddressSlot {
        match plane {
            Plane::Management => self.management,
            Plane::Business => self.business,
            Plane::StoragePublic => self.storage_public,
            Plane::StorageCluster => self.storage_cluster,
        }
    }
}

/// Shared address floating over several entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatingAddress {
    pub name: String,
    pub plane: Plane,
    pub address: AddressSlot,
    /// Entities the address floats over
    pub members: Vec<String>,
}

/// Virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualMachine {
    pub name: String,
    pub role: VmRole,
    pub flavor: VmFlavor,
    pub management: AddressSlot,
    pub business: AddressSlot,
}

impl VirtualMachine {
    pub fn slot(&self, plane: Plane) -> AddressSlot {
        match plane {
            Plane::Management => self.management,
            Plane::Business => self.business,
            Plane::StoragePublic | Plane::StorageCluster => AddressSlot::NotApplicable,
        }
    }
}

/// Distributed storage cluster layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageCluster {
    pub name: String,
    pub members: Vec<String>,
    pub monitors: Vec<String>,
    pub redundancy: RedundancyPolicy,
    pub raw_capacity_tb: u64,
    pub usable_capacity_tb: f64,
    /// Floating management address, `NotApplicable` when disabled
    pub float_address: AddressSlot,
}

/// Headline numbers of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub server_count: usize,
    pub vm_count: usize,
    pub desktop_count: usize,
    pub storage_cluster_count: usize,
    pub floating_address_count: usize,
    pub assigned_addresses: usize,
    pub pending_slots: usize,
}

/// One concrete address and who holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressAssignment {
    pub entity: String,
    pub plane: Plane,
    pub address: Ipv4Addr,
}

/// Complete resource plan of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub params: DeploymentParams,
    pub servers: Vec<Server>,
    pub floating_addresses: Vec<FloatingAddress>,
    pub vms: Vec<VirtualMachine>,
    pub storage_clusters: Vec<StorageCluster>,
    pub requirements: Requirements,
    pub usage: UsageReport,
    pub warnings: Vec<String>,
    pub stages: Vec<StageRecord>,
    pub summary: PlanSummary,
}

impl Plan {
    /// Every slot of the plan with its owner, in generation order
    pub fn slots(&self) -> Vec<(&str, Plane, AddressSlot)> {
        let mut slots = Vec::new();
        for server in &self.servers {
            for plane in Plane::ALL {
                slots.push((server.name.as_str(), plane, server.slot(plane)));
            }
        }
        for float in &self.floating_addresses {
            slots.push((float.name.as_str(), float.plane, float.address));
        }
        for vm in &self.vms {
            slots.push((vm.name.as_str(), Plane::Management, vm.management));
            slots.push((vm.name.as_str(), Plane::Business, vm.business));
        }
        for cluster in &self.storage_clusters {
            slots.push((cluster.name.as_str(), Plane::Management, cluster.float_address));
        }
        slots
    }

    /// Concrete addresses only, for the rendering collaborator
    pub fn address_assignments(&self) -> Vec<AddressAssignment> {
        self.slots()
            .into_iter()
            .filter_map(|(entity, plane, slot)| {
                slot.address().map(|address| AddressAssignment {
                    entity: entity.to_string(),
                    plane,
                    address,
                })
            })
            .collect()
    }

    pub fn floating(&self, name: &str) -> Option<&FloatingAddress> {
        self.floating_addresses.iter().find(|f| f.name == name)
    }

    pub fn stage(&self, stage: PlanStage) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.stage == stage)
    }
}

/// Accumulates generator output while the pipeline runs
#[derive(Debug)]
pub struct PlanDraft<'a> {
    pub params: &'a DeploymentParams,
    pub manager: IpManager,
    pub servers: Vec<Server>,
    pub floating_addresses: Vec<FloatingAddress>,
    pub vms: Vec<VirtualMachine>,
    pub storage_clusters: Vec<StorageCluster>,
    pub stages: Vec<StageRecord>,
}

impl<'a> PlanDraft<'a> {
    pub fn new(params: &'a DeploymentParams, manager: IpManager) -> Self {
        Self {
            params,
            manager,
            servers: Vec::new(),
            floating_addresses: Vec::new(),
            vms: Vec::new(),
            storage_clusters: Vec::new(),
            stages: Vec::new(),
        }
    }
}
