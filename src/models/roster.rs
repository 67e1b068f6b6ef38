//! Roster (solution) model.
//!
//! A roster is the flat set of (employee, slot) records produced by a
//! successful solve. Records are kept employee-major, slots ascending,
//! so serialized output is deterministic for a given assignment.
//!
//! `Roster::verify` re-checks the coverage, rotation, and fairness
//! rules directly on the records, independent of the solver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CoverageTable, Employee, Horizon, Slot};

/// A complete weekend roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Working records, employee-major.
    pub entries: Vec<RosterEntry>,
}

/// One employee working one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Employee identifier.
    pub employee: String,
    /// Weekend slot (1-based).
    pub slot: Slot,
}

/// A rule broken by a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (slot number, employee id, or cycle start).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of roster violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Slot staffed with the wrong number of employees.
    CoverageMismatch,
    /// Rotating employee not working exactly once in a cycle.
    RotationBroken,
    /// Two pool employees' totals differ by more than one.
    FairnessExceeded,
    /// Record references an unknown employee or a slot outside the horizon.
    UnknownReference,
}

impl RosterEntry {
    /// Creates a new record.
    pub fn new(employee: impl Into<String>, slot: Slot) -> Self {
        Self {
            employee: employee.into(),
            slot,
        }
    }
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record.
    pub fn add_entry(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }

    /// Number of records.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots worked by an employee, ascending.
    pub fn slots_for_employee(&self, employee: &str) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self
            .entries
            .iter()
            .filter(|e| e.employee == employee)
            .map(|e| e.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Employees working a slot, in record order.
    pub fn employees_at(&self, slot: Slot) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.slot == slot)
            .map(|e| e.employee.as_str())
            .collect()
    }

    /// Total slots worked per employee (only employees with records).
    pub fn totals(&self) -> BTreeMap<String, u32> {
        let mut totals = BTreeMap::new();
        for e in &self.entries {
            *totals.entry(e.employee.clone()).or_insert(0) += 1;
        }
        totals
    }

    /// Checks the roster against coverage, rotation, and fairness rules.
    ///
    /// Returns every violation found; an empty list means the roster
    /// satisfies all three rules for this configuration.
    pub fn verify(
        &self,
        employees: &[Employee],
        horizon: &Horizon,
        coverage: &CoverageTable,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for e in &self.entries {
            if !employees.iter().any(|emp| emp.id == e.employee) {
                violations.push(Violation::new(
                    ViolationType::UnknownReference,
                    &e.employee,
                    format!("Unknown employee '{}'", e.employee),
                ));
            }
            if !horizon.contains(e.slot) {
                violations.push(Violation::new(
                    ViolationType::UnknownReference,
                    e.slot.to_string(),
                    format!("Slot {} outside horizon 1..={}", e.slot, horizon.length),
                ));
            }
        }

        // Coverage
        let requirements = coverage.requirements(horizon);
        for (slot, &required) in horizon.slots().zip(requirements.iter()) {
            let staffed = self.employees_at(slot).len() as u32;
            if staffed != required {
                violations.push(Violation::new(
                    ViolationType::CoverageMismatch,
                    slot.to_string(),
                    format!("Slot {slot} staffed by {staffed}, requires {required}"),
                ));
            }
        }

        // Rotation
        for rotating in employees.iter().filter(|e| e.is_rotating()) {
            let worked = self.slots_for_employee(&rotating.id);
            for cycle in horizon.cycles() {
                let count = worked.iter().filter(|&&s| cycle.contains(s)).count();
                if count != 1 {
                    violations.push(Violation::new(
                        ViolationType::RotationBroken,
                        cycle.start.to_string(),
                        format!(
                            "'{}' works {count} times in slots {}..={}",
                            rotating.id, cycle.start, cycle.end
                        ),
                    ));
                }
            }
        }

        // Fairness
        let totals = self.totals();
        let pool: Vec<(&str, u32)> = employees
            .iter()
            .filter(|e| e.is_pool())
            .map(|e| (e.id.as_str(), totals.get(&e.id).copied().unwrap_or(0)))
            .collect();
        for (i, &(id1, t1)) in pool.iter().enumerate() {
            for &(id2, t2) in pool.iter().skip(i + 1) {
                if t1.abs_diff(t2) > 1 {
                    violations.push(Violation::new(
                        ViolationType::FairnessExceeded,
                        format!("{id1}/{id2}"),
                        format!("'{id1}' works {t1}, '{id2}' works {t2}"),
                    ));
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoveragePeriod;

    fn staff() -> Vec<Employee> {
        vec![
            Employee::pool("A"),
            Employee::pool("B"),
            Employee::rotating("D"),
        ]
    }

    fn sample_roster() -> Roster {
        // Horizon 4, cycle 4, slot 2 doubled.
        let mut r = Roster::new();
        r.add_entry(RosterEntry::new("A", 1));
        r.add_entry(RosterEntry::new("A", 2));
        r.add_entry(RosterEntry::new("B", 3));
        r.add_entry(RosterEntry::new("B", 4));
        r.add_entry(RosterEntry::new("D", 2));
        r
    }

    fn coverage() -> CoverageTable {
        CoverageTable::new().with_period(CoveragePeriod::new("peak", vec![2]))
    }

    #[test]
    fn test_queries() {
        let r = sample_roster();
        assert_eq!(r.entry_count(), 5);
        assert_eq!(r.slots_for_employee("B"), vec![3, 4]);
        assert_eq!(r.employees_at(2), vec!["A", "D"]);
        assert_eq!(r.totals()["A"], 2);
        assert_eq!(r.totals().get("C"), None);
    }

    #[test]
    fn test_verify_valid() {
        let r = sample_roster();
        assert!(r.verify(&staff(), &Horizon::new(4, 4), &coverage()).is_empty());
    }

    #[test]
    fn test_verify_coverage_mismatch() {
        let r = sample_roster();
        let violations = r.verify(&staff(), &Horizon::new(4, 4), &CoverageTable::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::CoverageMismatch);
        assert_eq!(violations[0].entity_id, "2");
    }

    #[test]
    fn test_verify_rotation_and_fairness() {
        let mut r = Roster::new();
        for slot in 1..=4 {
            r.add_entry(RosterEntry::new("A", slot));
        }
        let violations = r.verify(&staff(), &Horizon::new(4, 4), &CoverageTable::new());
        let kinds: Vec<_> = violations.iter().map(|v| v.violation_type.clone()).collect();
        assert!(kinds.contains(&ViolationType::RotationBroken));
        assert!(kinds.contains(&ViolationType::FairnessExceeded));
    }

    #[test]
    fn test_verify_unknown_reference() {
        let mut r = sample_roster();
        r.add_entry(RosterEntry::new("Z", 9));
        let violations = r.verify(&staff(), &Horizon::new(4, 4), &coverage());
        assert_eq!(
            violations
                .iter()
                .filter(|v| v.violation_type == ViolationType::UnknownReference)
                .count(),
            2
        );
    }
}
