//! Virtual machine generation.
//!
//! VMs follow the scene's role table in order, instances in index order,
//! and each VM draws management before business.

use super::draw_if;
use super::types::VirtualMachine;
use crate::catalog::{scene_roles, Instances, VmRole, VmRoleSpec};
use crate::config::DeploymentParams;
use crate::ip::{IpManager, Plane};
use log::info;

/// Instance count of one scene row
pub fn instance_count(spec: &VmRoleSpec, params: &DeploymentParams) -> u32 {
    match spec.instances {
        Instances::Fixed(n) => n,
        Instances::PerManagementNode => params.count_mng,
        Instances::Desktops => params.desktop_count,
    }
}

/// Management and business applicability of a VM role.
///
/// In combined network mode the business plane does not exist; a role that
/// would only have a business address takes a management one instead.
pub fn vm_planes(spec: &VmRoleSpec, params: &DeploymentParams) -> (bool, bool) {
    if params.combined_network {
        (spec.management || spec.business, false)
    } else {
        (spec.management, spec.business)
    }
}

pub fn vm_name(params: &DeploymentParams, role: VmRole, index: u32) -> String {
    match role {
        VmRole::Desktop => format!("{}-{}-{:04}", params.hostname_prefix, role.tag(), index),
        _ => format!("{}-{}-{:02}", params.hostname_prefix, role.tag(), index),
    }
}

pub fn generate_vms(params: &DeploymentParams, manager: &mut IpManager) -> Vec<VirtualMachine> {
    let mut vms = Vec::new();

    for spec in scene_roles(params.scene) {
        let count = instance_count(spec, params);
        let (uses_management, uses_business) = vm_planes(spec, params);
        for index in 1..=count {
            let management = draw_if(manager, Plane::Management, uses_management);
            let business = draw_if(manager, Plane::Business, uses_business);
            vms.push(VirtualMachine {
                name: vm_name(params, spec.role, index),
                role: spec.role,
                flavor: spec.flavor,
                management,
                business,
            });
        }
        if count > 0 {
            info!("Generated {} {:?} VM(s)", count, spec.role);
        }
    }

    vms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scene;
    use crate::ip::{AddressSlot, IpRanges};
    use std::net::Ipv4Addr;

    fn manager(combined: bool) -> IpManager {
        IpManager::new(
            &IpRanges {
                management: "10.0.0.1-10.0.0.100".to_string(),
                business: "10.1.0.1-10.1.0.100".to_string(),
                ..Default::default()
            },
            combined,
        )
    }

    #[test]
    fn test_standard_scene_order() {
        let params = DeploymentParams {
            desktop_count: 3,
            ..Default::default()
        };
        let vms = generate_vms(&params, &mut manager(false));
        let names: Vec<_> = vms.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["vdi-ctl-01", "vdi-gw-01", "vdi-vd-0001", "vdi-vd-0002", "vdi-vd-0003"]);

        assert_eq!(vms[0].management, AddressSlot::Concrete(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(vms[0].business, AddressSlot::Concrete(Ipv4Addr::new(10, 1, 0, 1)));
        assert_eq!(vms[2].management, AddressSlot::NotApplicable);
        assert_eq!(vms[2].business, AddressSlot::Concrete(Ipv4Addr::new(10, 1, 0, 3)));
    }

    #[test]
    fn test_enterprise_controllers_follow_mng_count() {
        let params = DeploymentParams {
            scene: Scene::Enterprise,
            count_mng: 3,
            desktop_count: 0,
            ..Default::default()
        };
        let vms = generate_vms(&params, &mut manager(false));
        let controllers = vms.iter().filter(|v| v.role == VmRole::Controller).count();
        assert_eq!(controllers, 3);
        // 3 controllers, 2 databases, 2 gateways, 1 file server
        assert_eq!(vms.len(), 8);
        let db = vms.iter().find(|v| v.role == VmRole::Database).unwrap();
        assert_eq!(db.business, AddressSlot::NotApplicable);
    }

    #[test]
    fn test_combined_network_moves_business_only_roles_to_management() {
        let params = DeploymentParams {
            combined_network: true,
            desktop_count: 2,
            ..Default::default()
        };
        let mut manager = manager(true);
        let vms = generate_vms(&params, &mut manager);
        assert!(vms.iter().all(|v| v.business == AddressSlot::NotApplicable));
        assert!(vms.iter().all(|v| v.management.is_concrete()));
        assert_eq!(manager.cursor(Plane::Management), 4);
        assert_eq!(manager.cursor(Plane::Business), 0);
    }

    #[test]
    fn test_business_exhaustion_marks_desktops_pending() {
        let mut manager = IpManager::new(
            &IpRanges {
                management: "10.0.0.1-10".to_string(),
                business: "10.1.0.1-4".to_string(),
                ..Default::default()
            },
            false,
        );
        let params = DeploymentParams {
            desktop_count: 5,
            ..Default::default()
        };
        let vms = generate_vms(&params, &mut manager);
        let pending = vms.iter().filter(|v| v.business.is_pending()).count();
        // ctl + gw + 2 desktops fit, 3 desktops do not
        assert_eq!(pending, 3);
        assert_eq!(manager.cursor(Plane::Business), 7);
    }
}
