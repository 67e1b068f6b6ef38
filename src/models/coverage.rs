//! Coverage periods and slot classification.
//!
//! A coverage table is a list of named periods ("april", "december", ...)
//! each listing the slots that need two concurrent employees. Every
//! other slot needs exactly one.
//!
//! # Classification
//! The double-staffed set is the union of all period slot lists, so a
//! slot named by several periods still requires exactly 2.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Horizon, Slot};

/// Staffing level of a slot outside every coverage period.
pub const SINGLE_COVERAGE: u32 = 1;

/// Staffing level of a slot inside any coverage period.
pub const DOUBLE_COVERAGE: u32 = 2;

/// A named period of double-staffed slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// Period label (month or season name).
    pub label: String,
    /// Slots requiring two employees.
    pub slots: Vec<Slot>,
}

impl CoveragePeriod {
    /// Creates a period from an explicit slot list.
    pub fn new(label: impl Into<String>, slots: Vec<Slot>) -> Self {
        Self {
            label: label.into(),
            slots,
        }
    }

    /// Creates a period covering a contiguous slot range.
    pub fn range(label: impl Into<String>, slots: std::ops::RangeInclusive<Slot>) -> Self {
        Self::new(label, slots.collect())
    }
}

/// Ordered table of coverage periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageTable {
    /// Periods in configuration order.
    pub periods: Vec<CoveragePeriod>,
}

impl CoverageTable {
    /// Creates an empty table (every slot single-staffed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a period.
    pub fn with_period(mut self, period: CoveragePeriod) -> Self {
        self.periods.push(period);
        self
    }

    /// Whether the table names no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Union of all period slots.
    pub fn double_slots(&self) -> BTreeSet<Slot> {
        self.periods
            .iter()
            .flat_map(|p| p.slots.iter().copied())
            .collect()
    }

    /// Required staffing for a single slot.
    pub fn required_at(&self, slot: Slot) -> u32 {
        if self.periods.iter().any(|p| p.slots.contains(&slot)) {
            DOUBLE_COVERAGE
        } else {
            SINGLE_COVERAGE
        }
    }

    /// Required staffing for every slot of the horizon.
    ///
    /// Index `i` holds the requirement of slot `i + 1`. Slots listed
    /// outside the horizon are ignored here; validation rejects them.
    pub fn requirements(&self, horizon: &Horizon) -> Vec<u32> {
        let doubles = self.double_slots();
        horizon
            .slots()
            .map(|slot| {
                if doubles.contains(&slot) {
                    DOUBLE_COVERAGE
                } else {
                    SINGLE_COVERAGE
                }
            })
            .collect()
    }

    /// Total employee-slots demanded over the horizon.
    pub fn total_demand(&self, horizon: &Horizon) -> u32 {
        self.requirements(horizon).iter().sum()
    }
}
