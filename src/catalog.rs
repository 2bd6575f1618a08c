//! Static catalog data: server roles and models, VM roles and flavors, and
//! the per-scene VM role tables.
//!
//! Every lookup is an exhaustive match, so adding a scene or role without
//! filling in its table entry fails to compile.

use crate::config::Scene;
use serde::{Deserialize, Serialize};

/// Which planes an entity draws addresses on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneSet {
    pub management: bool,
    pub business: bool,
    pub storage_public: bool,
    pub storage_cluster: bool,
}

/// Physical server role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerRole {
    Management,
    Compute,
    /// Compute server also running storage daemons
    Converged,
    Storage,
}

impl ServerRole {
    /// Planes the role uses before deployment options are considered
    pub fn base_planes(self) -> PlaneSet {
        match self {
            ServerRole::Management | ServerRole::Compute => PlaneSet {
                management: true,
                business: true,
                storage_public: true,
                storage_cluster: false,
            },
            ServerRole::Converged => PlaneSet {
                management: true,
                business: true,
                storage_public: true,
                storage_cluster: true,
            },
            ServerRole::Storage => PlaneSet {
                management: true,
                business: false,
                storage_public: true,
                storage_cluster: true,
            },
        }
    }

    /// Short tag used in host names
    pub fn tag(self) -> &'static str {
        match self {
            ServerRole::Management => "mng",
            ServerRole::Compute => "cmp",
            ServerRole::Converged => "hci",
            ServerRole::Storage => "sto",
        }
    }

    pub fn runs_storage(self) -> bool {
        matches!(self, ServerRole::Converged | ServerRole::Storage)
    }
}

/// Hardware model shipped for a server role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerModel {
    pub model: &'static str,
    pub cpu_cores: u32,
    pub memory_gb: u32,
    pub system_disks: u32,
    pub data_disks: u32,
    pub data_disk_tb: u32,
}

pub fn server_model(role: ServerRole) -> ServerModel {
    match role {
        ServerRole::Management => ServerModel {
            model: "2U-2S-M",
            cpu_cores: 32,
            memory_gb: 256,
            system_disks: 2,
            data_disks: 2,
            data_disk_tb: 2,
        },
        ServerRole::Compute => ServerModel {
            model: "2U-2S-C",
            cpu_cores: 64,
            memory_gb: 512,
            system_disks: 2,
            data_disks: 0,
            data_disk_tb: 0,
        },
        ServerRole::Converged => ServerModel {
            model: "2U-2S-H",
            cpu_cores: 64,
            memory_gb: 768,
            system_disks: 2,
            data_disks: 6,
            data_disk_tb: 4,
        },
        ServerRole::Storage => ServerModel {
            model: "2U-1S-S",
            cpu_cores: 24,
            memory_gb: 128,
            system_disks: 2,
            data_disks: 12,
            data_disk_tb: 8,
        },
    }
}

/// Virtual machine role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmRole {
    Controller,
    Database,
    Gateway,
    FileServer,
    TeachingGateway,
    Desktop,
}

impl VmRole {
    pub fn tag(self) -> &'static str {
        match self {
            VmRole::Controller => "ctl",
            VmRole::Database => "db",
            VmRole::Gateway => "gw",
            VmRole::FileServer => "fs",
            VmRole::TeachingGateway => "tgw",
            VmRole::Desktop => "vd",
        }
    }
}

/// How many instances of a VM role a deployment gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instances {
    Fixed(u32),
    /// One per management server
    PerManagementNode,
    /// The requested desktop count
    Desktops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VmFlavor {
    pub vcpu: u32,
    pub memory_gb: u32,
    pub disk_gb: u32,
}

/// One row of a scene table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmRoleSpec {
    pub role: VmRole,
    pub instances: Instances,
    pub management: bool,
    pub business: bool,
    pub flavor: VmFlavor,
}

const CONTROLLER_FLAVOR: VmFlavor = VmFlavor { vcpu: 8, memory_gb: 16, disk_gb: 200 };
const DATABASE_FLAVOR: VmFlavor = VmFlavor { vcpu: 8, memory_gb: 32, disk_gb: 500 };
const GATEWAY_FLAVOR: VmFlavor = VmFlavor { vcpu: 4, memory_gb: 8, disk_gb: 100 };
const FILE_SERVER_FLAVOR: VmFlavor = VmFlavor { vcpu: 4, memory_gb: 16, disk_gb: 2000 };
const DESKTOP_FLAVOR: VmFlavor = VmFlavor { vcpu: 4, memory_gb: 8, disk_gb: 100 };

const STANDARD_ROLES: &[VmRoleSpec] = &[
    VmRoleSpec {
        role: VmRole::Controller,
        instances: Instances::Fixed(1),
        management: true,
        business: true,
        flavor: CONTROLLER_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Gateway,
        instances: Instances::Fixed(1),
        management: true,
        business: true,
        flavor: GATEWAY_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Desktop,
        instances: Instances::Desktops,
        management: false,
        business: true,
        flavor: DESKTOP_FLAVOR,
    },
];

const ENTERPRISE_ROLES: &[VmRoleSpec] = &[
    VmRoleSpec {
        role: VmRole::Controller,
        instances: Instances::PerManagementNode,
        management: true,
        business: true,
        flavor: CONTROLLER_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Database,
        instances: Instances::Fixed(2),
        management: true,
        business: false,
        flavor: DATABASE_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Gateway,
        instances: Instances::Fixed(2),
        management: true,
        business: true,
        flavor: GATEWAY_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::FileServer,
        instances: Instances::Fixed(1),
        management: false,
        business: true,
        flavor: FILE_SERVER_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Desktop,
        instances: Instances::Desktops,
        management: false,
        business: true,
        flavor: DESKTOP_FLAVOR,
    },
];

const EDUCATION_ROLES: &[VmRoleSpec] = &[
    VmRoleSpec {
        role: VmRole::Controller,
        instances: Instances::PerManagementNode,
        management: true,
        business: true,
        flavor: CONTROLLER_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::TeachingGateway,
        instances: Instances::Fixed(1),
        management: true,
        business: true,
        flavor: GATEWAY_FLAVOR,
    },
    VmRoleSpec {
        role: VmRole::Desktop,
        instances: Instances::Desktops,
        management: false,
        business: true,
        flavor: DESKTOP_FLAVOR,
    },
];

/// VM roles of a scene, in generation order
pub fn scene_roles(scene: Scene) -> &'static [VmRoleSpec] {
    match scene {
        Scene::Standard => STANDARD_ROLES,
        Scene::Enterprise => ENTERPRISE_ROLES,
        Scene::Education => EDUCATION_ROLES,
    }
}
