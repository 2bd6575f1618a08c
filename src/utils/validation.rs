//! Deployment parameter validation.
//!
//! Structural rules are checked as a batch: every violated rule is reported,
//! not only the first one. Nothing here looks at the range text beyond
//! whether it is present; range parsing belongs to the allocation engine.

use crate::config::{DeploymentParams, StorageMode};
use regex::Regex;
use std::sync::LazyLock;

static HOSTNAME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{0,30}$").expect("hostname prefix regex is valid"));

/// Result of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Fatal rule violations
    pub errors: Vec<String>,
    /// Non-fatal findings carried into the plan warnings
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check cross-field consistency of the parameters
///
/// # Examples
/// ```
/// use vdiplan::config::DeploymentParams;
/// use vdiplan::utils::validation::validate_params;
///
/// let outcome = validate_params(&DeploymentParams::default());
/// assert!(outcome.is_valid());
/// ```
pub fn validate_params(params: &DeploymentParams) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let errors = &mut outcome.errors;

    if params.count_mng < 1 {
        errors.push("At least one management server is required (count_mng = 0)".to_string());
    } else if params.mng_dual_node && params.count_mng < 2 {
        errors.push(format!(
            "Dual management nodes require count_mng >= 2, got {}",
            params.count_mng
        ));
    }

    if !HOSTNAME_PREFIX.is_match(&params.hostname_prefix) {
        errors.push(format!(
            "Invalid hostname prefix '{}': must start with a lowercase letter and contain only lowercase letters, digits and '-' (at most 31 characters)",
            params.hostname_prefix
        ));
    }

    let min_nodes = params.redundancy.min_nodes();
    match params.storage_mode {
        StorageMode::Separate => {
            if params.count_storage < min_nodes {
                errors.push(format!(
                    "Separate storage with {} needs at least {} storage servers, got {}",
                    params.redundancy.label(),
                    min_nodes,
                    params.count_storage
                ));
            }
        }
        StorageMode::Converged => {
            if params.count_cmp < min_nodes {
                errors.push(format!(
                    "Converged storage with {} needs at least {} compute servers, got {}",
                    params.redundancy.label(),
                    min_nodes,
                    params.count_cmp
                ));
            }
        }
        StorageMode::None => {
            if params.ceph_float_ip {
                errors.push("Storage floating addresses are enabled but storage_mode is 'none'".to_string());
            }
        }
    }

    if params.storage_mode != StorageMode::Separate && params.count_storage > 0 {
        errors.push(format!(
            "{} dedicated storage servers requested but storage_mode is not 'separate'",
            params.count_storage
        ));
    }

    if params.has_storage() && params.max_nodes_per_cluster < min_nodes {
        errors.push(format!(
            "max_nodes_per_cluster ({}) is below the {} minimum of {} nodes",
            params.max_nodes_per_cluster,
            params.redundancy.label(),
            min_nodes
        ));
    }

    if params.combined_network && !params.business_ip_range.trim().is_empty() {
        outcome.warnings.push(
            "Combined network mode is enabled; the business IP range is ignored".to_string(),
        );
    }

    for error in &outcome.errors {
        log::debug!("Parameter rule violated: {}", error);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedundancyPolicy;

    #[test]
    fn test_defaults_are_valid() {
        let outcome = validate_params(&DeploymentParams::default());
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let params = DeploymentParams {
            count_mng: 1,
            mng_dual_node: true,
            hostname_prefix: "9vdi".to_string(),
            storage_mode: StorageMode::None,
            ceph_float_ip: true,
            count_storage: 2,
            ..Default::default()
        };
        let outcome = validate_params(&params);
        assert_eq!(outcome.errors.len(), 4, "{:?}", outcome.errors);
        assert!(outcome.errors[0].contains("count_mng >= 2"));
        assert!(outcome.errors[1].contains("'9vdi'"));
        assert!(outcome.errors[2].contains("storage_mode is 'none'"));
        assert!(outcome.errors[3].contains("not 'separate'"));
    }

    #[test]
    fn test_redundancy_minimums() {
        let params = DeploymentParams {
            storage_mode: StorageMode::Separate,
            count_storage: 5,
            redundancy: RedundancyPolicy::Erasure4Plus2,
            max_nodes_per_cluster: 4,
            ..Default::default()
        };
        let outcome = validate_params(&params);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors[0].contains("at least 6 storage servers, got 5"));
        assert!(outcome.errors[1].contains("max_nodes_per_cluster (4)"));

        let params = DeploymentParams {
            count_cmp: 2,
            ..Default::default()
        };
        let outcome = validate_params(&params);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("at least 3 compute servers"));
    }

    #[test]
    fn test_zero_management_servers() {
        let params = DeploymentParams {
            count_mng: 0,
            ..Default::default()
        };
        let outcome = validate_params(&params);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("count_mng = 0"));
    }

    #[test]
    fn test_hostname_prefix_rules() {
        for ok in ["vdi", "a", "lab-01", "x234567890123456789012345678901"] {
            let params = DeploymentParams {
                hostname_prefix: ok.to_string(),
                ..Default::default()
            };
            assert!(validate_params(&params).is_valid(), "{}", ok);
        }
        for bad in ["", "VDI", "-vdi", "vdi_01", "x2345678901234567890123456789012"] {
            let params = DeploymentParams {
                hostname_prefix: bad.to_string(),
                ..Default::default()
            };
            assert!(!validate_params(&params).is_valid(), "{}", bad);
        }
    }

    #[test]
    fn test_business_range_in_combined_mode_warns() {
        let params = DeploymentParams {
            combined_network: true,
            business_ip_range: "10.1.0.0/24".to_string(),
            ..Default::default()
        };
        let outcome = validate_params(&params);
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings.len(), 1);
    }
}
