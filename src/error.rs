//! Error types for rostering.
//!
//! Keeps "no roster exists" (`Infeasible`) apart from "the engine could
//! not decide" (`EngineFailure`) so callers never mistake either for an
//! empty but successful roster.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for u-roster.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration rejected before any model was built.
    #[error("Configuration error: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// The engine proved that no assignment satisfies the model.
    #[error("No feasible roster exists for this configuration")]
    Infeasible,

    /// The engine failed or exhausted its budget without an answer.
    #[error("Solving engine failure: {0}")]
    EngineFailure(String),

    /// IO errors (config files, output files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rostering operations.
pub type Result<T> = std::result::Result<T, RosterError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RosterError {
    /// Whether this error means the configuration has no solution.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible)
    }

    /// Validation issues carried by a configuration error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Configuration(errors) => errors,
            _ => &[],
        }
    }
}
