//! Shared utilities: parameter validation.

pub mod validation;

pub use validation::{validate_params, ValidationOutcome};
