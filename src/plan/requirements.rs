//! Requirement estimation.
//!
//! Address demand is derived from the parameters alone, using the same
//! plane applicability lookups the generators use, so the estimate for a
//! plane always equals the number of draws generation will make on it.

use super::servers::{server_planes, server_roles};
use super::storage::{cluster_sizes, storage_node_count};
use super::vms::{instance_count, vm_planes};
use crate::catalog::scene_roles;
use crate::config::DeploymentParams;
use crate::ip::{Requirement, Requirements};
use log::debug;

/// Number of storage clusters the parameters produce
pub fn storage_cluster_count(params: &DeploymentParams) -> usize {
    cluster_sizes(
        storage_node_count(params),
        params.max_nodes_per_cluster as usize,
        params.redundancy.min_nodes() as usize,
    )
    .len()
}

pub fn estimate_requirements(params: &DeploymentParams) -> Requirements {
    let mut mng_server = 0u64;
    let mut biz_server = 0u64;
    let mut storage_public = 0u64;
    let mut storage_cluster = 0u64;

    for (role, count) in server_roles(params) {
        let planes = server_planes(role, params);
        let count = u64::from(count);
        mng_server += count * u64::from(planes.management);
        biz_server += count * u64::from(planes.business);
        storage_public += count * u64::from(planes.storage_public);
        storage_cluster += count * u64::from(planes.storage_cluster);
    }

    // Floating addresses are server-side management demand
    if params.mng_dual_node {
        mng_server += 1;
    }
    if params.ceph_float_ip {
        mng_server += storage_cluster_count(params) as u64;
    }

    let mut mng_vm = 0u64;
    let mut biz_vm = 0u64;
    for spec in scene_roles(params.scene) {
        let count = u64::from(instance_count(spec, params));
        let (management, business) = vm_planes(spec, params);
        mng_vm += count * u64::from(management);
        biz_vm += count * u64::from(business);
    }

    let requirements = Requirements {
        management: Requirement::Split {
            server: mng_server,
            vm: mng_vm,
        },
        business: Requirement::Split {
            server: biz_server,
            vm: biz_vm,
        },
        storage_public: Requirement::Count(storage_public),
        storage_cluster: Requirement::Count(storage_cluster),
    };
    debug!("Estimated requirements: {:?}", requirements);
    requirements
}
