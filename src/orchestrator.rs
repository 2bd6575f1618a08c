//! Plan orchestrator.
//!
//! This module coordinates a planning run from raw parameters to a finished
//! [`Plan`]: defaults are merged, the parameters are validated, demand is
//! estimated, the allocation engine is built and checked, and the generator
//! stages run in pipeline order. Every failure, including a panic inside a
//! generator, comes back as a [`PlanError`].

use crate::catalog::VmRole;
use crate::config::{DeploymentParams, ParamOverrides};
use crate::error::PlanError;
use crate::ip::{AddressSlot, IpManager, Plane, Requirements, UsageReport};
use crate::plan::{
    estimate_requirements, generate_servers, generate_storage_clusters, generate_vms, Plan,
    PlanDraft, PlanStage, PlanSummary, StageRecord,
};
use crate::utils::validation::validate_params;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::panic::{self, AssertUnwindSafe};

/// Generator stages in execution order
pub const GENERATION_PIPELINE: [PlanStage; 3] = [
    PlanStage::Servers,
    PlanStage::VirtualMachines,
    PlanStage::StorageClusters,
];

/// Outcome of validation and estimation without generating anything
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreflightReport {
    pub requirements: Requirements,
    /// Pool sizes before any draw
    pub pools: UsageReport,
    pub warnings: Vec<String>,
}

/// Generate a plan from partial parameters merged over the defaults
pub fn generate_plan(overrides: &ParamOverrides) -> Result<Plan, PlanError> {
    generate_plan_from(DeploymentParams::merged(overrides))
}

/// Generate a plan from a complete parameter set
pub fn generate_plan_from(params: DeploymentParams) -> Result<Plan, PlanError> {
    info!("Generating plan for project '{}'", params.project_name);

    let (manager, requirements, mut warnings) = prepare(&params)?;

    let mut draft = PlanDraft::new(&params, manager);
    let layout_warnings = panic::catch_unwind(AssertUnwindSafe(|| run_pipeline(&mut draft)))
        .map_err(|payload| PlanError::Generation(panic_message(payload.as_ref())))??;
    warnings.extend(layout_warnings);

    let PlanDraft {
        manager,
        servers,
        floating_addresses,
        vms,
        storage_clusters,
        stages,
        ..
    } = draft;

    let usage = manager.usage_report();
    warnings.extend(usage.warnings.iter().cloned());

    let mut plan = Plan {
        params,
        servers,
        floating_addresses,
        vms,
        storage_clusters,
        requirements,
        usage,
        warnings,
        stages,
        summary: PlanSummary::default(),
    };

    verify_unique_addresses(&plan)?;
    plan.summary = summarize(&plan);

    info!(
        "Plan complete: {} servers, {} VMs, {} storage clusters, {} addresses assigned, {} pending",
        plan.summary.server_count,
        plan.summary.vm_count,
        plan.summary.storage_cluster_count,
        plan.summary.assigned_addresses,
        plan.summary.pending_slots
    );
    if !plan.warnings.is_empty() {
        warn!("Plan has {} warning(s)", plan.warnings.len());
    }

    Ok(plan)
}

/// Validate everything and estimate demand, but generate nothing
pub fn preflight(params: &DeploymentParams) -> Result<PreflightReport, PlanError> {
    let (manager, requirements, mut warnings) = prepare(params)?;
    let pools = manager.usage_report();
    warnings.extend(pools.warnings.iter().cloned());
    Ok(PreflightReport {
        requirements,
        pools,
        warnings,
    })
}

/// Parameter validation, estimation, engine construction and the
/// sufficiency check, in that order
fn prepare(params: &DeploymentParams) -> Result<(IpManager, Requirements, Vec<String>), PlanError> {
    let validation = validate_params(params);
    if !validation.is_valid() {
        warn!("Parameter validation failed with {} error(s)", validation.errors.len());
        return Err(PlanError::InvalidParams(validation.errors));
    }
    let mut warnings = validation.warnings;

    let requirements = estimate_requirements(params);
    info!(
        "Address demand: management {}, business {}, storage public {}, storage cluster {}",
        requirements.management.total(),
        requirements.business.total(),
        requirements.storage_public.total(),
        requirements.storage_cluster.total()
    );

    let manager = IpManager::new(&params.ip_ranges(), params.combined_network);
    if manager.has_validation_errors() {
        let errors = manager.validation_errors();
        warn!("IP range validation failed with {} error(s)", errors.len());
        return Err(PlanError::IpValidation(errors));
    }

    for overlap in manager.cross_plane_overlaps() {
        warn!("{}", overlap);
        warnings.push(overlap);
    }

    for shortfall in manager.check_sufficiency(&requirements) {
        warn!("{}", shortfall);
        warnings.push(shortfall);
    }

    Ok((manager, requirements, warnings))
}

fn run_pipeline(draft: &mut PlanDraft<'_>) -> Result<Vec<String>, PlanError> {
    let mut warnings = Vec::new();
    for stage in GENERATION_PIPELINE {
        info!("Running stage: {}", stage);
        warnings.extend(run_stage(draft, stage)?);
        draft.stages.push(StageRecord {
            stage,
            cursors_after: draft.manager.cursors(),
        });
    }
    Ok(warnings)
}

fn run_stage(draft: &mut PlanDraft<'_>, stage: PlanStage) -> Result<Vec<String>, PlanError> {
    let last = draft.stages.last().map(|record| record.stage);
    if last != stage.previous() {
        return Err(PlanError::Generation(format!(
            "stage '{}' cannot run after {}",
            stage,
            last.map_or_else(|| "nothing".to_string(), |s| format!("'{}'", s))
        )));
    }

    let params = draft.params;
    match stage {
        PlanStage::Servers => {
            let (servers, floating) = generate_servers(params, &mut draft.manager);
            draft.servers = servers;
            draft.floating_addresses = floating;
            Ok(Vec::new())
        }
        PlanStage::VirtualMachines => {
            draft.vms = generate_vms(params, &mut draft.manager);
            Ok(Vec::new())
        }
        PlanStage::StorageClusters => {
            let (clusters, warnings) =
                generate_storage_clusters(params, &draft.servers, &mut draft.manager);
            draft.storage_clusters = clusters;
            Ok(warnings)
        }
    }
}

/// Every concrete address may be held by one entity per plane
fn verify_unique_addresses(plan: &Plan) -> Result<(), PlanError> {
    let mut holders: HashMap<(Plane, Ipv4Addr), &str> = HashMap::new();
    for (entity, plane, slot) in plan.slots() {
        let AddressSlot::Concrete(address) = slot else {
            continue;
        };
        if let Some(previous) = holders.insert((plane, address), entity) {
            return Err(PlanError::Generation(format!(
                "{} address {} assigned to both {} and {}",
                plane.label(),
                address,
                previous,
                entity
            )));
        }
    }
    Ok(())
}

fn summarize(plan: &Plan) -> PlanSummary {
    let slots = plan.slots();
    let cluster_floats = plan
        .storage_clusters
        .iter()
        .filter(|c| c.float_address != AddressSlot::NotApplicable)
        .count();

    PlanSummary {
        server_count: plan.servers.len(),
        vm_count: plan.vms.len(),
        desktop_count: plan.vms.iter().filter(|v| v.role == VmRole::Desktop).count(),
        storage_cluster_count: plan.storage_clusters.len(),
        floating_address_count: plan.floating_addresses.len() + cluster_floats,
        assigned_addresses: slots.iter().filter(|(_, _, s)| s.is_concrete()).count(),
        pending_slots: slots.iter().filter(|(_, _, s)| s.is_pending()).count(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic during generation".to_string()
    }
}
