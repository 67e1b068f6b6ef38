//! Input validation for rostering problems.
//!
//! Checks structural integrity of a configuration before any model is
//! built. Detects:
//! - Empty, blank, or duplicate employee IDs
//! - Zero horizon or cycle length
//! - A rotating employee outside the employee set
//! - Coverage period slots outside the horizon
//! - Blank or duplicate period labels
//! - Slots demanding more employees than exist
//!
//! Whether a structurally valid configuration is satisfiable is left to
//! the solving engine.

use std::collections::HashSet;

use crate::config::RosterConfig;
use crate::models::DOUBLE_COVERAGE;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No employees configured.
    EmptyEmployees,
    /// Two employees share the same ID.
    DuplicateId,
    /// An employee ID or period label is empty.
    BlankId,
    /// Horizon or cycle length is zero.
    InvalidLength,
    /// The rotating employee is not in the employee list.
    UnknownRotatingEmployee,
    /// A coverage period names a slot outside the horizon.
    SlotOutOfRange,
    /// Two coverage periods share the same label.
    DuplicateLabel,
    /// A slot requires more employees than are configured.
    CoverageExceedsStaff,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster configuration.
///
/// Checks:
/// 1. At least one employee, no blank or duplicate IDs
/// 2. Positive horizon and cycle length
/// 3. The rotating employee is a configured employee
/// 4. Period labels are non-blank and unique
/// 5. Every period slot lies in `1..=horizon`
/// 6. Double-staffed slots have at least two employees available
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &RosterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.employees.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyEmployees,
            "No employees configured",
        ));
    }

    let mut ids = HashSet::new();
    for id in &config.employees {
        if id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                "Employee ID must not be blank",
            ));
        }
        if !ids.insert(id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {id}"),
            ));
        }
    }

    if config.horizon == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLength,
            "Horizon must be positive",
        ));
    }
    if config.cycle_length == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLength,
            "Cycle length must be positive",
        ));
    }

    if !ids.contains(config.rotating.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownRotatingEmployee,
            format!(
                "Rotating employee '{}' is not a configured employee",
                config.rotating
            ),
        ));
    }

    let mut labels = HashSet::new();
    for period in &config.periods.periods {
        if period.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                "Coverage period label must not be blank",
            ));
        } else if !labels.insert(period.label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateLabel,
                format!("Duplicate coverage period: {}", period.label),
            ));
        }

        for &slot in &period.slots {
            if slot == 0 || slot > config.horizon {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SlotOutOfRange,
                    format!(
                        "Period '{}' lists slot {slot} outside 1..={}",
                        period.label, config.horizon
                    ),
                ));
            }
        }
    }

    if !config.periods.double_slots().is_empty()
        && config.employees.len() < DOUBLE_COVERAGE as usize
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::CoverageExceedsStaff,
            format!(
                "Double-staffed slots need {DOUBLE_COVERAGE} employees, only {} configured",
                config.employees.len()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
