//! Error channel of plan generation.
//!
//! Every failure of a planning run is reported as a [`PlanError`] carrying a
//! human-readable, possibly multi-line message and a machine [`ErrorCode`].
//! [`PlanResponse`] is the serializable form for batch callers.

use crate::plan::Plan;
use serde::Serialize;
use std::fmt;

/// Machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "INVALID_PARAMS")]
    InvalidParams,
    #[serde(rename = "IP_VALIDATION_ERROR")]
    IpValidation,
    #[serde(rename = "GENERATION_ERROR")]
    Generation,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidParams => "INVALID_PARAMS",
            ErrorCode::IpValidation => "IP_VALIDATION_ERROR",
            ErrorCode::Generation => "GENERATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a planning run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Parameter combinations that contradict each other, one entry per rule
    #[error("Invalid deployment parameters:\n{}", .0.join("\n"))]
    InvalidParams(Vec<String>),

    /// Malformed, reversed or duplicate range text, one entry per problem
    #[error("IP range validation failed:\n{}", .0.join("\n"))]
    IpValidation(Vec<String>),

    #[error("Plan generation failed: {0}")]
    Generation(String),
}

impl PlanError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::InvalidParams(_) => ErrorCode::InvalidParams,
            PlanError::IpValidation(_) => ErrorCode::IpValidation,
            PlanError::Generation(_) => ErrorCode::Generation,
        }
    }

    /// Individual messages, without the header line
    pub fn details(&self) -> Vec<String> {
        match self {
            PlanError::InvalidParams(errors) | PlanError::IpValidation(errors) => errors.clone(),
            PlanError::Generation(message) => vec![message.clone()],
        }
    }
}

/// Discriminated result of a planning run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanResponse {
    Ok { plan: Box<Plan> },
    Error { code: ErrorCode, message: String },
}

impl From<Result<Plan, PlanError>> for PlanResponse {
    fn from(result: Result<Plan, PlanError>) -> Self {
        match result {
            Ok(plan) => PlanResponse::Ok { plan: Box::new(plan) },
            Err(e) => PlanResponse::Error {
                code: e.code(),
                message: e.to_string(),
            },
        }
    }
}
