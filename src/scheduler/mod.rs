//! Roster scheduling pipeline and KPI evaluation.
//!
//! `RosterScheduler` runs the whole single-pass pipeline: validate,
//! classify coverage, build the CP model, solve, decode, and re-verify
//! the decoded roster against the configuration.
//!
//! # KPI
//!
//! `RosterKpi` summarizes a roster: demand, per-employee totals, pool
//! spread, and the rotating employee's slots.

mod kpi;

pub use kpi::RosterKpi;

use tracing::{error, info};

use crate::config::RosterConfig;
use crate::cp::{CpSolver, MilpSolver, RosterCpBuilder, SolverConfig};
use crate::error::{Result, RosterError};
use crate::models::Roster;

/// End-to-end roster scheduler.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::scheduler::RosterScheduler;
///
/// let config = RosterConfig::new(["A", "B", "C", "D"], "D").with_horizon(16);
/// let roster = RosterScheduler::new().schedule(&config).unwrap();
/// assert_eq!(roster.entry_count(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RosterScheduler<S = MilpSolver> {
    solver: S,
    solver_config: SolverConfig,
}

impl RosterScheduler<MilpSolver> {
    /// Creates a scheduler backed by the MILP engine.
    pub fn new() -> Self {
        Self::with_solver(MilpSolver::new())
    }
}

impl Default for RosterScheduler<MilpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CpSolver> RosterScheduler<S> {
    /// Creates a scheduler backed by another engine.
    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            solver_config: SolverConfig::default(),
        }
    }

    /// Sets solver limits and options.
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    /// Produces a roster for the configuration.
    ///
    /// # Errors
    /// - `Configuration` if the configuration is invalid
    /// - `Infeasible` if no roster satisfies all rules
    /// - `EngineFailure` if the engine errs, runs out of budget, or
    ///   returns an assignment that breaks a rule
    pub fn schedule(&self, config: &RosterConfig) -> Result<Roster> {
        let builder = RosterCpBuilder::new(config)?;
        let roster = builder.solve(&self.solver, &self.solver_config)?;

        let violations = roster.verify(builder.staff(), &builder.horizon(), &config.periods);
        if let Some(first) = violations.first() {
            error!(count = violations.len(), "Solver assignment breaks roster rules");
            return Err(RosterError::EngineFailure(format!(
                "solver returned an invalid roster ({} violations, first: {})",
                violations.len(),
                first.message
            )));
        }

        info!(
            entries = roster.entry_count(),
            horizon = config.horizon,
            "Roster scheduled"
        );
        Ok(roster)
    }
}
