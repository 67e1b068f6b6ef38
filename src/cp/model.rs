//! Linear 0-1 constraint system.
//!
//! The engine-facing representation of a roster problem: boolean
//! variables and linear constraints `Σ coef·x (= | ≤ | ≥) rhs` over
//! them. Nothing here knows about employees or slots beyond the
//! variable names; the builder owns that mapping.

use serde::{Deserialize, Serialize};

/// Index of a boolean variable in a [`ConstraintSystem`].
pub type VarId = usize;

/// A boolean decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolVar {
    /// Variable name (e.g., `work_A_14`).
    pub name: String,
}

/// Comparison of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `activity == rhs`
    Eq,
    /// `activity <= rhs`
    Le,
    /// `activity >= rhs`
    Ge,
}

/// Which roster rule a constraint encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Exact staffing of one slot.
    Coverage,
    /// Rotating employee works once in one cycle.
    Rotation,
    /// Pairwise pool balance bound.
    Fairness,
}

/// A linear constraint over boolean variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constraint name (e.g., `coverage_14`).
    pub name: String,
    /// Encoded roster rule.
    pub kind: ConstraintKind,
    /// `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, i64)>,
    /// Comparison.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: i64,
}

impl LinearConstraint {
    /// Creates a constraint.
    pub fn new(
        name: impl Into<String>,
        kind: ConstraintKind,
        terms: Vec<(VarId, i64)>,
        sense: Sense,
        rhs: i64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            terms,
            sense,
            rhs,
        }
    }

    /// Left-hand side value under a full assignment.
    pub fn activity(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| values[*var])
            .map(|(_, coef)| coef)
            .sum()
    }

    /// Whether a full assignment satisfies this constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let activity = self.activity(values);
        match self.sense {
            Sense::Eq => activity == self.rhs,
            Sense::Le => activity <= self.rhs,
            Sense::Ge => activity >= self.rhs,
        }
    }
}

/// Variables and constraints of one model, handed opaquely to a solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem {
    /// Model name.
    pub name: String,
    vars: Vec<BoolVar>,
    constraints: Vec<LinearConstraint>,
}

impl ConstraintSystem {
    /// Creates an empty system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds a boolean variable and returns its index.
    pub fn add_var(&mut self, name: impl Into<String>) -> VarId {
        self.vars.push(BoolVar { name: name.into() });
        self.vars.len() - 1
    }

    /// Adds a constraint.
    ///
    /// # Panics
    /// Panics if a term references a variable that was never added.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        assert!(
            constraint.terms.iter().all(|(v, _)| *v < self.vars.len()),
            "constraint '{}' references an unknown variable",
            constraint.name
        );
        self.constraints.push(constraint);
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// All variables, in index order.
    pub fn vars(&self) -> &[BoolVar] {
        &self.vars
    }

    /// All constraints, in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Constraints encoding one roster rule.
    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    /// Looks up a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Constraints a full assignment breaks.
    ///
    /// An assignment of the wrong length breaks everything.
    pub fn violated_by(&self, values: &[bool]) -> Vec<&LinearConstraint> {
        if values.len() != self.vars.len() {
            return self.constraints.iter().collect();
        }
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(values))
            .collect()
    }

    /// Whether a full assignment satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.vars.len() && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}
