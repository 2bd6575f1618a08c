//! Storage cluster layout.
//!
//! Storage-running servers are split, in generation order, into balanced
//! clusters of at most `max_nodes_per_cluster` members. When floating
//! addresses are enabled each cluster draws one management address after
//! its members, which all drew their own addresses in the server stage.

use super::types::{Server, StorageCluster};
use crate::config::DeploymentParams;
use crate::ip::{AddressSlot, IpManager, Plane};
use log::{info, warn};

/// Monitor count for clusters large enough to hold a quorum
const MONITORS_PER_CLUSTER: usize = 3;

/// Member counts of each cluster for `node_count` storage nodes.
///
/// Clusters are balanced. The cluster count is lowered when balancing would
/// leave a cluster below `min_nodes`, even if that pushes clusters past
/// `max_per_cluster`.
pub fn cluster_sizes(node_count: usize, max_per_cluster: usize, min_nodes: usize) -> Vec<usize> {
    if node_count == 0 {
        return Vec::new();
    }
    let max_per_cluster = max_per_cluster.max(1);
    let by_max = node_count.div_ceil(max_per_cluster);
    let by_min = (node_count / min_nodes.max(1)).max(1);
    let clusters = by_max.min(by_min);

    let base = node_count / clusters;
    let extra = node_count % clusters;
    (0..clusters).map(|i| base + usize::from(i < extra)).collect()
}

/// Number of storage-running servers the parameters produce
pub fn storage_node_count(params: &DeploymentParams) -> usize {
    use crate::config::StorageMode;
    match params.storage_mode {
        StorageMode::None => 0,
        StorageMode::Converged => params.count_cmp as usize,
        StorageMode::Separate => params.count_storage as usize,
    }
}

pub fn cluster_name(params: &DeploymentParams, index: usize) -> String {
    format!("{}-ceph-{:02}", params.hostname_prefix, index)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lay out storage clusters over the storage servers already generated.
///
/// Returns the clusters and any layout warnings.
pub fn generate_storage_clusters(
    params: &DeploymentParams,
    servers: &[Server],
    manager: &mut IpManager,
) -> (Vec<StorageCluster>, Vec<String>) {
    let nodes: Vec<&Server> = servers.iter().filter(|s| s.role.runs_storage()).collect();
    let sizes = cluster_sizes(
        nodes.len(),
        params.max_nodes_per_cluster as usize,
        params.redundancy.min_nodes() as usize,
    );

    let mut clusters = Vec::with_capacity(sizes.len());
    let mut warnings = Vec::new();
    let mut offset = 0;

    for (i, size) in sizes.into_iter().enumerate() {
        let members = &nodes[offset..offset + size];
        offset += size;

        let name = cluster_name(params, i + 1);
        if size > params.max_nodes_per_cluster as usize {
            let msg = format!(
                "Storage cluster {} has {} nodes, above the configured maximum of {}, to keep the {} minimum of {}",
                name,
                size,
                params.max_nodes_per_cluster,
                params.redundancy.label(),
                params.redundancy.min_nodes()
            );
            warn!("{}", msg);
            warnings.push(msg);
        }

        let member_names: Vec<String> = members.iter().map(|s| s.name.clone()).collect();
        let monitor_count = if size >= MONITORS_PER_CLUSTER { MONITORS_PER_CLUSTER } else { 1 };
        let monitors = member_names[..monitor_count].to_vec();

        let raw_capacity_tb: u64 = members
            .iter()
            .map(|s| u64::from(s.model.data_disks) * u64::from(s.model.data_disk_tb))
            .sum();
        let (num, den) = params.redundancy.efficiency();
        let usable_capacity_tb = round_tenth(raw_capacity_tb as f64 * f64::from(num) / f64::from(den));

        let float_address = if params.ceph_float_ip {
            manager.next_address(Plane::Management)
        } else {
            AddressSlot::NotApplicable
        };

        info!(
            "Storage cluster {}: {} nodes, {} TB raw, {} TB usable ({})",
            name,
            size,
            raw_capacity_tb,
            usable_capacity_tb,
            params.redundancy.label()
        );

        clusters.push(StorageCluster {
            name,
            members: member_names,
            monitors,
            redundancy: params.redundancy,
            raw_capacity_tb,
            usable_capacity_tb,
            float_address,
        });
    }

    (clusters, warnings)
}
