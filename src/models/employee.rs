//! Employee model.
//!
//! Employees are the resources of a roster. Each carries an explicit
//! role tag: one rotating employee bound to a fixed per-cycle quota,
//! and pool employees whose totals are balanced against each other.

use serde::{Deserialize, Serialize};

/// Role of an employee within the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Works exactly once per cycle, regardless of slot coverage.
    Rotating,
    /// Shares the remaining demand within the fairness band.
    Pool,
}

/// An employee that can be assigned to weekend slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Roster role.
    pub role: Role,
}

impl Employee {
    /// Creates a new employee.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Creates a pool employee.
    pub fn pool(id: impl Into<String>) -> Self {
        Self::new(id, Role::Pool)
    }

    /// Creates the rotating employee.
    pub fn rotating(id: impl Into<String>) -> Self {
        Self::new(id, Role::Rotating)
    }

    /// Whether this employee is the rotating one.
    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.role == Role::Rotating
    }

    /// Whether this employee belongs to the balanced pool.
    #[inline]
    pub fn is_pool(&self) -> bool {
        self.role == Role::Pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_roles() {
        let a = Employee::pool("A");
        assert!(a.is_pool());
        assert!(!a.is_rotating());

        let d = Employee::rotating("D");
        assert_eq!(d.role, Role::Rotating);
        assert!(d.is_rotating());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&Employee::rotating("D")).unwrap();
        assert_eq!(json, r#"{"id":"D","role":"rotating"}"#);
    }
}
