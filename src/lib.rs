//! # VdiPlan - Resource and IP address planner for cloud-desktop deployments
//!
//! This library turns a flat set of deployment parameters into a complete
//! resource plan: physical servers, infrastructure and desktop VMs, storage
//! clusters, and a concrete IP address for every slot on four network planes.
//!
//! ## Overview
//!
//! A deployment uses four independent address planes: management, business,
//! storage public and storage cluster. Address ranges are free text (single
//! addresses, dash ranges, CIDR blocks, mixed separators). Each planning run
//! parses them into pools once and draws addresses sequentially, so the same
//! parameters always produce the same plan.
//!
//! ## Architecture
//!
//! - `ip`: range parsing, address pools and the per-run allocation engine
//! - `catalog`: static server, VM and scene tables
//! - `config`: deployment parameters and their defaults
//! - `config_loader`: YAML/JSON parameter file loading
//! - `plan`: plan entities, requirement estimation and the generators
//! - `utils`: parameter validation
//! - `orchestrator`: the planning pipeline
//! - `error`: error codes and the serializable result type
//!
//! ## Example Usage
//!
//! ```rust
//! use vdiplan::config::ParamOverrides;
//! use vdiplan::orchestrator;
//!
//! let overrides = ParamOverrides {
//!     desktop_count: Some(20),
//!     mng_ip_range: Some("192.168.10.0/26".to_string()),
//!     business_ip_range: Some("10.20.0.1-10.20.0.60".to_string()),
//!     storage_public_ip_range: Some("172.16.1.1-30".to_string()),
//!     storage_cluster_ip_range: Some("172.16.2.1-30".to_string()),
//!     ..Default::default()
//! };
//!
//! let plan = orchestrator::generate_plan(&overrides)?;
//! assert_eq!(plan.summary.pending_slots, 0);
//! for row in plan.address_assignments() {
//!     println!("{} {} {}", row.entity, row.plane, row.address);
//! }
//! # Ok::<(), vdiplan::error::PlanError>(())
//! ```
//!
//! ## Error Handling
//!
//! Planning never panics past the orchestrator. Failures come back as
//! `PlanError` with one of three codes: `INVALID_PARAMS` for contradictory
//! parameters, `IP_VALIDATION_ERROR` for malformed, reversed or duplicate
//! range text, and `GENERATION_ERROR` for anything else. Running out of
//! addresses is not an error: the affected slots are marked pending and the
//! plan carries a warning.

pub mod catalog;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod ip;
pub mod orchestrator;
pub mod plan;
pub mod utils;
