//! Deployment parameters.
//!
//! `DeploymentParams` is the flat parameter bag a planning run works from.
//! Callers usually supply a partial `ParamOverrides` (from a file, the CLI,
//! or both) and merge it over the built-in defaults.

use crate::ip::IpRanges;
use serde::{Deserialize, Serialize};

/// Named deployment scenario, selecting the infrastructure VM set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Single controller, one gateway
    Standard,
    /// HA controllers, replicated database and gateways, file service
    Enterprise,
    /// Classroom deployment with a teaching gateway
    Education,
}

/// Where the distributed storage runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// No distributed storage
    None,
    /// Storage daemons co-located on compute servers
    Converged,
    /// Dedicated storage servers
    Separate,
}

/// Data redundancy policy of the storage clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedundancyPolicy {
    Replica2,
    Replica3,
    #[serde(rename = "erasure_4_2")]
    Erasure4Plus2,
}

impl RedundancyPolicy {
    /// Smallest cluster able to honor the policy
    pub fn min_nodes(self) -> u32 {
        match self {
            RedundancyPolicy::Replica2 => 2,
            RedundancyPolicy::Replica3 => 3,
            RedundancyPolicy::Erasure4Plus2 => 6,
        }
    }

    /// Usable fraction of raw capacity as (numerator, denominator)
    pub fn efficiency(self) -> (u32, u32) {
        match self {
            RedundancyPolicy::Replica2 => (1, 2),
            RedundancyPolicy::Replica3 => (1, 3),
            RedundancyPolicy::Erasure4Plus2 => (4, 6),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RedundancyPolicy::Replica2 => "2 replicas",
            RedundancyPolicy::Replica3 => "3 replicas",
            RedundancyPolicy::Erasure4Plus2 => "erasure coding 4+2",
        }
    }
}

/// Complete parameter set for one planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentParams {
    pub project_name: String,
    /// Prefix for every generated host and VM name
    pub hostname_prefix: String,
    pub scene: Scene,
    /// Management server count
    pub count_mng: u32,
    /// Compute server count (converged servers in converged mode)
    pub count_cmp: u32,
    /// Dedicated storage server count, separate mode only
    pub count_storage: u32,
    pub storage_mode: StorageMode,
    pub redundancy: RedundancyPolicy,
    pub max_nodes_per_cluster: u32,
    /// Management nodes run as an HA pair behind a floating address
    pub mng_dual_node: bool,
    /// Each storage cluster gets a floating management address
    pub ceph_float_ip: bool,
    /// Business network merged into the management network
    pub combined_network: bool,
    pub desktop_count: u32,
    pub mng_ip_range: String,
    pub business_ip_range: String,
    pub storage_public_ip_range: String,
    pub storage_cluster_ip_range: String,
}

impl Default for DeploymentParams {
    fn default() -> Self {
        Self {
            project_name: "vdi".to_string(),
            hostname_prefix: "vdi".to_string(),
            scene: Scene::Standard,
            count_mng: 2,
            count_cmp: 3,
            count_storage: 0,
            storage_mode: StorageMode::Converged,
            redundancy: RedundancyPolicy::Replica3,
            max_nodes_per_cluster: 16,
            mng_dual_node: true,
            ceph_float_ip: true,
            combined_network: false,
            desktop_count: 100,
            mng_ip_range: String::new(),
            business_ip_range: String::new(),
            storage_public_ip_range: String::new(),
            storage_cluster_ip_range: String::new(),
        }
    }
}

impl DeploymentParams {
    /// Defaults with the given overrides applied
    pub fn merged(overrides: &ParamOverrides) -> Self {
        let mut params = Self::default();
        overrides.apply_to(&mut params);
        params
    }

    /// Range text for the allocation engine
    pub fn ip_ranges(&self) -> IpRanges {
        IpRanges {
            management: self.mng_ip_range.clone(),
            business: self.business_ip_range.clone(),
            storage_public: self.storage_public_ip_range.clone(),
            storage_cluster: self.storage_cluster_ip_range.clone(),
        }
    }

    pub fn has_storage(&self) -> bool {
        self.storage_mode != StorageMode::None
    }
}

/// Partial parameter set; every field left unset keeps its default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_mng: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_cmp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_storage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_mode: Option<StorageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<RedundancyPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes_per_cluster: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mng_dual_node: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceph_float_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mng_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_public_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_cluster_ip_range: Option<String>,
}

macro_rules! apply_fields {
    (layer $src:expr, $dst:expr, $($field:ident),+ $(,)?) => {
        $(
            if $src.$field.is_some() {
                $dst.$field = $src.$field.clone();
            }
        )+
    };
    ($src:expr, $dst:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$src.$field {
                $dst.$field = value.clone();
            }
        )+
    };
}

impl ParamOverrides {
    /// Write every set field onto `params`
    pub fn apply_to(&self, params: &mut DeploymentParams) {
        apply_fields!(
            self,
            params,
            project_name,
            hostname_prefix,
            scene,
            count_mng,
            count_cmp,
            count_storage,
            storage_mode,
            redundancy,
            max_nodes_per_cluster,
            mng_dual_node,
            ceph_float_ip,
            combined_network,
            desktop_count,
            mng_ip_range,
            business_ip_range,
            storage_public_ip_range,
            storage_cluster_ip_range,
        );
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn layered(mut self, other: &ParamOverrides) -> Self {
        apply_fields!(
            layer other,
            self,
            project_name,
            hostname_prefix,
            scene,
            count_mng,
            count_cmp,
            count_storage,
            storage_mode,
            redundancy,
            max_nodes_per_cluster,
            mng_dual_node,
            ceph_float_ip,
            combined_network,
            desktop_count,
            mng_ip_range,
            business_ip_range,
            storage_public_ip_range,
            storage_cluster_ip_range,
        );
        self
    }
}
