use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use vdiplan::config::{DeploymentParams, ParamOverrides};
use vdiplan::config_loader;
use vdiplan::error::PlanResponse;
use vdiplan::orchestrator;

/// Output encoding of the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Resource and IP address planner for cloud-desktop deployments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML or JSON deployment parameter file
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Merge the business network into the management network
    #[arg(long)]
    combined_network: bool,

    /// Management network range
    #[arg(long)]
    mng_range: Option<String>,

    /// Business network range
    #[arg(long)]
    business_range: Option<String>,

    /// Storage public network range
    #[arg(long)]
    storage_public_range: Option<String>,

    /// Storage cluster network range
    #[arg(long)]
    storage_cluster_range: Option<String>,

    /// Validate parameters and ranges and report demand without generating a plan
    #[arg(long)]
    validate_only: bool,
}

impl Args {
    /// Overrides given on the command line; these win over the parameter file
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            combined_network: self.combined_network.then_some(true),
            mng_ip_range: self.mng_range.clone(),
            business_ip_range: self.business_range.clone(),
            storage_public_ip_range: self.storage_public_range.clone(),
            storage_cluster_ip_range: self.storage_cluster_range.clone(),
            ..Default::default()
        }
    }
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).wrap_err("Failed to encode JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(value).wrap_err("Failed to encode YAML")?,
    };
    Ok(text)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let file_overrides = match &args.params {
        Some(path) => config_loader::load_overrides(path)
            .wrap_err_with(|| format!("Failed to load parameters from '{}'", path.display()))?,
        None => ParamOverrides::default(),
    };
    let params = DeploymentParams::merged(&file_overrides.layered(&args.overrides()));

    if args.validate_only {
        let report = orchestrator::preflight(&params).map_err(|e| eyre!("[{}] {}", e.code(), e))?;
        emit(&render(&report, args.format)?, args.output.as_deref())?;
        info!("Validation passed");
        return Ok(());
    }

    let response = PlanResponse::from(orchestrator::generate_plan_from(params));
    emit(&render(&response, args.format)?, args.output.as_deref())?;

    match response {
        PlanResponse::Ok { .. } => {
            info!("Plan generation completed successfully");
            Ok(())
        }
        PlanResponse::Error { code, message } => Err(eyre!("[{}] {}", code, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["vdiplan", "--params", "site.yaml"]);

        assert_eq!(args.params, Some(PathBuf::from("site.yaml")));
        assert_eq!(args.output, None);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.validate_only);
        assert_eq!(args.overrides(), ParamOverrides::default());
    }

    #[test]
    fn test_range_flags_become_overrides() {
        let args = Args::parse_from([
            "vdiplan",
            "--format", "yaml",
            "--combined-network",
            "--mng-range", "10.0.0.0/24",
            "--storage-cluster-range", "10.3.0.1-50",
            "--validate-only",
        ]);

        assert_eq!(args.format, OutputFormat::Yaml);
        assert!(args.validate_only);
        let overrides = args.overrides();
        assert_eq!(overrides.combined_network, Some(true));
        assert_eq!(overrides.mng_ip_range.as_deref(), Some("10.0.0.0/24"));
        assert_eq!(overrides.storage_cluster_ip_range.as_deref(), Some("10.3.0.1-50"));
        assert_eq!(overrides.business_ip_range, None);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let file = ParamOverrides {
            mng_ip_range: Some("192.168.0.0/24".to_string()),
            desktop_count: Some(30),
            ..Default::default()
        };
        let args = Args::parse_from(["vdiplan", "--mng-range", "10.0.0.0/24"]);
        let params = DeploymentParams::merged(&file.layered(&args.overrides()));
        assert_eq!(params.mng_ip_range, "10.0.0.0/24");
        assert_eq!(params.desktop_count, 30);
    }
}
