//! Solving engine interface and its MILP adapter.
//!
//! `CpSolver` is the seam between model construction and whatever
//! engine decides it. `MilpSolver` hands the 0-1 system to `good_lp`
//! with the pure-Rust `microlp` backend: one binary column per
//! `BoolVar`, one row per `LinearConstraint`.
//!
//! # Objective
//!
//! Minimizes Σ x. Roster models fix that sum through their coverage
//! equalities, so the objective only settles variables no constraint
//! touches (they come back `false`).
//!
//! # Limits
//!
//! `microlp` has no budget of its own. With a `time_limit` the solve runs
//! on a worker thread and the caller stops waiting when the budget is
//! spent; the abandoned solve finishes in the background.
//!
//! # Reference
//! - Achterberg (2007), "Constraint Integer Programming"
//! - Wolsey (1998), "Integer Programming", Ch. 7 (Branch and Bound)

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::{debug, info, warn};

use super::model::{ConstraintSystem, LinearConstraint, Sense, VarId};

/// Terminal status of a solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A satisfying assignment was found.
    Solved,
    /// No satisfying assignment exists.
    Infeasible,
    /// The time limit ran out before a decision.
    Unknown,
    /// The engine failed.
    Error(String),
}

/// Solver limits.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall-clock budget. `None` = unlimited.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Result of a solve call.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Terminal status.
    pub status: SolveStatus,
    /// Value per variable. Empty unless `status` is `Solved`.
    pub values: Vec<bool>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl CpSolution {
    /// Creates a solution with the given status and no values.
    pub fn with_status(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Whether a satisfying assignment is available.
    pub fn is_solution_found(&self) -> bool {
        self.status == SolveStatus::Solved
    }

    /// Value of a variable, if solved.
    pub fn value(&self, var: VarId) -> Option<bool> {
        self.values.get(var).copied()
    }
}

/// A constraint-solving engine.
pub trait CpSolver {
    /// Solves the system. Blocks until a terminal status is reached.
    fn solve(&self, model: &ConstraintSystem, config: &SolverConfig) -> CpSolution;
}

/// Mixed-integer engine backed by `good_lp` and `microlp`.
#[derive(Debug, Clone, Default)]
pub struct MilpSolver;

impl MilpSolver {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for MilpSolver {
    fn solve(&self, model: &ConstraintSystem, config: &SolverConfig) -> CpSolution {
        let started = Instant::now();
        debug!(
            model = %model.name,
            vars = model.var_count(),
            constraints = model.constraint_count(),
            "Starting MILP solve"
        );

        let (status, values) = match config.time_limit {
            None => solve_system(model),
            Some(limit) => solve_within(model, limit),
        };
        let elapsed = started.elapsed();
        info!(model = %model.name, ?status, ?elapsed, "Solve finished");

        CpSolution {
            status,
            values,
            elapsed,
        }
    }
}

fn solve_within(model: &ConstraintSystem, limit: Duration) -> (SolveStatus, Vec<bool>) {
    if limit.is_zero() {
        return (SolveStatus::Unknown, Vec::new());
    }

    let (tx, rx) = mpsc::channel();
    let owned = model.clone();
    thread::spawn(move || {
        // The receiver is gone once the caller has timed out.
        let _ = tx.send(solve_system(&owned));
    });

    match rx.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            warn!(?limit, "Time limit reached before the engine decided");
            (SolveStatus::Unknown, Vec::new())
        }
        Err(RecvTimeoutError::Disconnected) => (
            SolveStatus::Error("solver thread terminated without an answer".into()),
            Vec::new(),
        ),
    }
}

fn solve_system(model: &ConstraintSystem) -> (SolveStatus, Vec<bool>) {
    // Nothing to hand to the engine; only constant rows can remain.
    if model.var_count() == 0 {
        return if model.is_satisfied_by(&[]) {
            (SolveStatus::Solved, Vec::new())
        } else {
            (SolveStatus::Infeasible, Vec::new())
        };
    }

    let mut columns = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .vars()
        .iter()
        .map(|v| columns.add(variable().binary().name(v.name.clone())))
        .collect();
    let objective: Expression = vars.iter().copied().sum();

    let mut problem = columns.minimise(objective).using(microlp);
    for c in model.constraints() {
        problem = problem.with(to_row(c, &vars));
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<bool> = vars.iter().map(|&v| solution.value(v) > 0.5).collect();
            let broken = model.violated_by(&values);
            match broken.first() {
                None => (SolveStatus::Solved, values),
                Some(first) => (
                    SolveStatus::Error(format!(
                        "rounded assignment breaks {} constraints, first: {}",
                        broken.len(),
                        first.name
                    )),
                    Vec::new(),
                ),
            }
        }
        Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, Vec::new()),
        Err(e) => (SolveStatus::Error(e.to_string()), Vec::new()),
    }
}

fn to_row(c: &LinearConstraint, vars: &[Variable]) -> Constraint {
    let lhs: Expression = c
        .terms
        .iter()
        .map(|&(v, coef)| coef as f64 * vars[v])
        .sum();
    let rhs = c.rhs as f64;
    match c.sense {
        Sense::Eq => constraint::eq(lhs, rhs),
        Sense::Le => constraint::leq(lhs, rhs),
        Sense::Ge => constraint::geq(lhs, rhs),
    }
}
