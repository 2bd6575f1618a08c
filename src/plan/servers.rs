//! Physical server generation.
//!
//! Servers are generated role by role (management, compute, storage) and
//! each server draws its addresses in plane order: management, business,
//! storage public, storage cluster. The management floating address is
//! drawn last, after every server it floats over has its own address.

use super::draw_if;
use super::types::{FloatingAddress, Server};
use crate::catalog::{server_model, PlaneSet, ServerRole};
use crate::config::{DeploymentParams, StorageMode};
use crate::ip::{IpManager, Plane};
use log::info;

/// Name of the floating management address of a dual-node deployment
pub const MNG_FLOAT_NAME: &str = "mng-float";

/// Role of the compute servers for the configured storage mode
pub fn compute_role(params: &DeploymentParams) -> ServerRole {
    match params.storage_mode {
        StorageMode::Converged => ServerRole::Converged,
        StorageMode::None | StorageMode::Separate => ServerRole::Compute,
    }
}

/// Server roles and counts in generation order
pub fn server_roles(params: &DeploymentParams) -> Vec<(ServerRole, u32)> {
    let mut roles = vec![
        (ServerRole::Management, params.count_mng),
        (compute_role(params), params.count_cmp),
    ];
    if params.storage_mode == StorageMode::Separate {
        roles.push((ServerRole::Storage, params.count_storage));
    }
    roles
}

/// Planes a server of `role` uses under the given deployment options.
///
/// Depends only on the role and the parameters, never on pool supply.
pub fn server_planes(role: ServerRole, params: &DeploymentParams) -> PlaneSet {
    let mut planes = role.base_planes();
    if params.combined_network {
        planes.business = false;
    }
    if !params.has_storage() {
        planes.storage_public = false;
        planes.storage_cluster = false;
    }
    planes
}

pub fn server_name(params: &DeploymentParams, role: ServerRole, index: u32) -> String {
    format!("{}-{}-{:02}", params.hostname_prefix, role.tag(), index)
}

/// Generate every physical server plus the management floating address
pub fn generate_servers(
    params: &DeploymentParams,
    manager: &mut IpManager,
) -> (Vec<Server>, Vec<FloatingAddress>) {
    let mut servers = Vec::new();

    for (role, count) in server_roles(params) {
        let planes = server_planes(role, params);
        for index in 1..=count {
            let management = draw_if(manager, Plane::Management, planes.management);
            let business = draw_if(manager, Plane::Business, planes.business);
            let storage_public = draw_if(manager, Plane::StoragePublic, planes.storage_public);
            let storage_cluster = draw_if(manager, Plane::StorageCluster, planes.storage_cluster);

            servers.push(Server {
                name: server_name(params, role, index),
                role,
                model: server_model(role),
                management,
                business,
                storage_public,
                storage_cluster,
            });
        }
        if count > 0 {
            info!("Generated {} {:?} server(s)", count, role);
        }
    }

    let mut floating = Vec::new();
    if params.mng_dual_node {
        let members = servers
            .iter()
            .filter(|s| s.role == ServerRole::Management)
            .map(|s| s.name.clone())
            .collect();
        floating.push(FloatingAddress {
            name: MNG_FLOAT_NAME.to_string(),
            plane: Plane::Management,
            address: manager.next_address(Plane::Management),
            members,
        });
    }

    (servers, floating)
}
