//! CP-based roster formulation.
//!
//! Translates a roster configuration into a 0-1 `ConstraintSystem`,
//! hands it to a `CpSolver`, and decodes the answer into a `Roster`.
//!
//! # Formulation
//!
//! One boolean `work_{e}_{s}` per (employee, slot), employee-major.
//!
//! | Constraint | Form | Count |
//! |------------|------|-------|
//! | `coverage_{s}` | Σ_e x[e,s] = required(s) | one per slot |
//! | `rotation_{r}_{start}` | Σ_{s∈cycle} x[r,s] = 1 | one per cycle |
//! | `balance_{e1}_{e2}_max` / `_min` | total(e1) − total(e2) ∈ [−1, 1] | two per ordered pool pair |
//!
//! There is no objective; the fairness band bounds imbalance.
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod model;
mod solver;

pub use model::{BoolVar, ConstraintKind, ConstraintSystem, LinearConstraint, Sense, VarId};
pub use solver::{CpSolution, CpSolver, MilpSolver, SolveStatus, SolverConfig};

use tracing::{debug, warn};

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{Employee, Horizon, Roster, RosterEntry, Slot};
use crate::validation::validate_config;

/// Maximum allowed difference between two pool employees' totals.
pub const FAIRNESS_BAND: i64 = 1;

/// Builds the roster constraint system from a configuration.
///
/// Validates first; invalid configurations never reach the builder.
pub fn build_model(config: &RosterConfig) -> Result<ConstraintSystem> {
    Ok(RosterCpBuilder::new(config)?.build())
}

/// Builds and decodes roster CP models.
///
/// # Example
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::cp::{MilpSolver, RosterCpBuilder, SolverConfig};
/// use u_roster::models::CoveragePeriod;
///
/// let config = RosterConfig::new(["A", "B", "C", "D"], "D")
///     .with_horizon(8)
///     .with_cycle_length(8)
///     .with_period(CoveragePeriod::new("spring", vec![3, 4]));
/// let builder = RosterCpBuilder::new(&config).unwrap();
/// let roster = builder
///     .solve(&MilpSolver::new(), &SolverConfig::default())
///     .unwrap();
/// assert_eq!(roster.entry_count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct RosterCpBuilder {
    staff: Vec<Employee>,
    horizon: Horizon,
    requirements: Vec<u32>,
}

impl RosterCpBuilder {
    /// Creates a builder from a validated configuration.
    ///
    /// # Errors
    /// `RosterError::Configuration` with every detected issue.
    pub fn new(config: &RosterConfig) -> Result<Self> {
        validate_config(config).map_err(RosterError::Configuration)?;
        let horizon = config.horizon();
        Ok(Self {
            staff: config.staff(),
            requirements: config.periods.requirements(&horizon),
            horizon,
        })
    }

    /// Employees with role tags, in variable order.
    pub fn staff(&self) -> &[Employee] {
        &self.staff
    }

    /// Planning horizon.
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Required staffing of a slot, or `None` outside the horizon.
    pub fn required_at(&self, slot: Slot) -> Option<u32> {
        let index = slot.checked_sub(1)? as usize;
        self.requirements.get(index).copied()
    }

    /// Variable index of (employee position, slot). `slot` must lie in
    /// the horizon.
    #[inline]
    pub(crate) fn var_id(&self, employee: usize, slot: Slot) -> VarId {
        debug_assert!(self.horizon.contains(slot));
        employee * self.horizon.length as usize + (slot - 1) as usize
    }

    /// Builds the constraint system.
    ///
    /// Creates:
    /// - A `BoolVar` per (employee, slot)
    /// - Exact coverage equality per slot
    /// - Exactly-once rotation equality per cycle
    /// - `[-1, 1]` balance bounds per ordered pair of pool employees
    pub fn build(&self) -> ConstraintSystem {
        let mut model = ConstraintSystem::new("weekend_roster");

        for employee in &self.staff {
            for slot in self.horizon.slots() {
                model.add_var(format!("work_{}_{}", employee.id, slot));
            }
        }

        // Coverage
        for (slot, &required) in self.horizon.slots().zip(&self.requirements) {
            let terms = (0..self.staff.len())
                .map(|e| (self.var_id(e, slot), 1))
                .collect();
            model.add_constraint(LinearConstraint::new(
                format!("coverage_{slot}"),
                ConstraintKind::Coverage,
                terms,
                Sense::Eq,
                i64::from(required),
            ));
        }

        // Rotation
        for (e, employee) in self.staff.iter().enumerate() {
            if !employee.is_rotating() {
                continue;
            }
            for cycle in self.horizon.cycles() {
                let terms = cycle.slots().map(|slot| (self.var_id(e, slot), 1)).collect();
                model.add_constraint(LinearConstraint::new(
                    format!("rotation_{}_{}", employee.id, cycle.start),
                    ConstraintKind::Rotation,
                    terms,
                    Sense::Eq,
                    1,
                ));
            }
        }

        // Fairness
        let pool: Vec<usize> = self
            .staff
            .iter()
            .enumerate()
            .filter(|(_, emp)| emp.is_pool())
            .map(|(e, _)| e)
            .collect();
        for &e1 in &pool {
            for &e2 in &pool {
                if e1 == e2 {
                    continue;
                }
                let terms: Vec<(VarId, i64)> = self
                    .horizon
                    .slots()
                    .flat_map(|slot| [(self.var_id(e1, slot), 1), (self.var_id(e2, slot), -1)])
                    .collect();
                let (id1, id2) = (&self.staff[e1].id, &self.staff[e2].id);
                model.add_constraint(LinearConstraint::new(
                    format!("balance_{id1}_{id2}_max"),
                    ConstraintKind::Fairness,
                    terms.clone(),
                    Sense::Le,
                    FAIRNESS_BAND,
                ));
                model.add_constraint(LinearConstraint::new(
                    format!("balance_{id1}_{id2}_min"),
                    ConstraintKind::Fairness,
                    terms,
                    Sense::Ge,
                    -FAIRNESS_BAND,
                ));
            }
        }

        debug!(
            vars = model.var_count(),
            constraints = model.constraint_count(),
            "Built roster model"
        );
        model
    }

    /// Builds, solves, and decodes the roster.
    pub fn solve<S: CpSolver>(&self, solver: &S, config: &SolverConfig) -> Result<Roster> {
        let model = self.build();
        let solution = solver.solve(&model, config);
        self.decode_solution(&solution)
    }

    /// Decodes a solver answer into a roster.
    ///
    /// Only a `Solved` status yields records; every other status maps to
    /// an error so no empty roster can pass for a successful one.
    pub fn decode_solution(&self, solution: &CpSolution) -> Result<Roster> {
        if !solution.is_solution_found() {
            return Err(match &solution.status {
                SolveStatus::Infeasible => {
                    warn!("Solver reported the roster model infeasible");
                    RosterError::Infeasible
                }
                SolveStatus::Error(msg) => RosterError::EngineFailure(msg.clone()),
                _ => RosterError::EngineFailure(format!(
                    "time limit reached after {:?} without a decision",
                    solution.elapsed
                )),
            });
        }

        let expected = self.staff.len() * self.horizon.length as usize;
        if solution.values.len() != expected {
            return Err(RosterError::EngineFailure(format!(
                "solver returned {} values for {expected} variables",
                solution.values.len()
            )));
        }

        let mut roster = Roster::new();
        for (e, employee) in self.staff.iter().enumerate() {
            for slot in self.horizon.slots() {
                if solution.value(self.var_id(e, slot)) == Some(true) {
                    roster.add_entry(RosterEntry::new(employee.id.clone(), slot));
                }
            }
        }
        debug!(entries = roster.entry_count(), "Decoded roster");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoveragePeriod, CoverageTable};

    fn spring_config() -> RosterConfig {
        RosterConfig::new(["A", "B", "C", "D"], "D")
            .with_horizon(8)
            .with_cycle_length(8)
            .with_period(CoveragePeriod::new("spring", vec![3, 4]))
    }

    fn coverage_of(config: &RosterConfig) -> CoverageTable {
        config.periods.clone()
    }

    struct FixedSolver(CpSolution);

    impl CpSolver for FixedSolver {
        fn solve(&self, _model: &ConstraintSystem, _config: &SolverConfig) -> CpSolution {
            self.0.clone()
        }
    }

    #[test]
    fn test_build_model_sizes() {
        let model = build_model(&spring_config()).unwrap();
        // 4 employees x 8 slots
        assert_eq!(model.var_count(), 32);
        assert_eq!(model.constraints_of(ConstraintKind::Coverage).count(), 8);
        assert_eq!(model.constraints_of(ConstraintKind::Rotation).count(), 1);
        // 3 pool employees: 6 ordered pairs x 2 bounds
        assert_eq!(model.constraints_of(ConstraintKind::Fairness).count(), 12);
        assert_eq!(model.vars()[0].name, "work_A_1");
        assert_eq!(model.vars()[31].name, "work_D_8");
    }

    #[test]
    fn test_coverage_right_hand_sides() {
        let model = build_model(&spring_config()).unwrap();
        assert_eq!(model.constraint("coverage_3").unwrap().rhs, 2);
        assert_eq!(model.constraint("coverage_5").unwrap().rhs, 1);
        assert_eq!(model.constraint("coverage_1").unwrap().sense, Sense::Eq);
    }

    #[test]
    fn test_required_at_outside_horizon() {
        let builder = RosterCpBuilder::new(&spring_config()).unwrap();
        assert_eq!(builder.required_at(3), Some(2));
        assert_eq!(builder.required_at(8), Some(1));
        assert_eq!(builder.required_at(0), None);
        assert_eq!(builder.required_at(9), None);
    }

    #[test]
    fn test_rotation_cycles_truncate() {
        let config = RosterConfig::new(["A", "B", "D"], "D")
            .with_horizon(10)
            .with_cycle_length(4);
        let model = build_model(&config).unwrap();
        let rotations: Vec<_> = model.constraints_of(ConstraintKind::Rotation).collect();
        assert_eq!(rotations.len(), 3);
        assert_eq!(rotations[2].name, "rotation_D_9");
        assert_eq!(rotations[2].terms.len(), 2);
    }

    #[test]
    fn test_fairness_bounds() {
        let model = build_model(&spring_config()).unwrap();
        let max = model.constraint("balance_A_B_max").unwrap();
        assert_eq!((max.sense, max.rhs), (Sense::Le, 1));
        let min = model.constraint("balance_B_A_min").unwrap();
        assert_eq!((min.sense, min.rhs), (Sense::Ge, -1));
        assert_eq!(max.terms.len(), 16);
        assert!(model.constraint("balance_A_D_max").is_none());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = RosterConfig::new(["A", "B"], "D");
        let err = build_model(&config).unwrap_err();
        assert!(matches!(err, RosterError::Configuration(_)));
    }

    #[test]
    fn test_solve_spring_scenario() {
        let config = spring_config();
        let builder = RosterCpBuilder::new(&config).unwrap();
        let roster = builder
            .solve(&MilpSolver::new(), &SolverConfig::default())
            .unwrap();

        assert_eq!(roster.entry_count(), 10);
        assert_eq!(roster.slots_for_employee("D").len(), 1);
        for slot in [1, 2, 5, 6, 7, 8] {
            assert_eq!(roster.employees_at(slot).len(), 1);
        }
        for slot in [3, 4] {
            assert_eq!(roster.employees_at(slot).len(), 2);
        }
        assert!(roster
            .verify(builder.staff(), &builder.horizon(), &coverage_of(&config))
            .is_empty());
    }

    #[test]
    fn test_records_are_employee_major() {
        let builder = RosterCpBuilder::new(&spring_config()).unwrap();
        let roster = builder
            .solve(&MilpSolver::new(), &SolverConfig::default())
            .unwrap();
        let order: Vec<(usize, Slot)> = roster
            .entries
            .iter()
            .map(|r| {
                let e = builder.staff().iter().position(|s| s.id == r.employee).unwrap();
                (e, r.slot)
            })
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_decode_infeasible() {
        let builder = RosterCpBuilder::new(&spring_config()).unwrap();
        let solver = FixedSolver(CpSolution::with_status(SolveStatus::Infeasible));
        let err = builder.solve(&solver, &SolverConfig::default()).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_decode_engine_failures() {
        let builder = RosterCpBuilder::new(&spring_config()).unwrap();

        let err = builder
            .decode_solution(&CpSolution::with_status(SolveStatus::Unknown))
            .unwrap_err();
        assert!(matches!(err, RosterError::EngineFailure(_)));

        let err = builder
            .decode_solution(&CpSolution::with_status(SolveStatus::Error("crashed".into())))
            .unwrap_err();
        assert!(matches!(err, RosterError::EngineFailure(ref m) if m == "crashed"));

        // Solved but with a truncated value vector
        let mut short = CpSolution::with_status(SolveStatus::Solved);
        short.values = vec![true; 3];
        let err = builder.decode_solution(&short).unwrap_err();
        assert!(matches!(err, RosterError::EngineFailure(_)));
    }

    #[test]
    fn test_decode_exact_true_only() {
        let builder = RosterCpBuilder::new(&spring_config()).unwrap();
        let mut values = vec![false; 32];
        values[builder.var_id(1, 5)] = true;
        values[builder.var_id(3, 2)] = true;
        let mut solution = CpSolution::with_status(SolveStatus::Solved);
        solution.values = values;

        let roster = builder.decode_solution(&solution).unwrap();
        assert_eq!(
            roster.entries,
            vec![RosterEntry::new("B", 5), RosterEntry::new("D", 2)]
        );
    }
}
