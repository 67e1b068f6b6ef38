//! Roster quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total demand | Σ required staffing over the horizon |
//! | Entries | Records in the roster |
//! | Double slots | Slots requiring two employees |
//! | Totals | Slots worked per employee |
//! | Pool spread | max − min of pool totals |
//! | Rotating slots | Slots worked by the rotating employee |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::RosterConfig;
use crate::models::{Roster, Slot, DOUBLE_COVERAGE};

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterKpi {
    /// Σ required staffing over the horizon.
    pub total_demand: u32,
    /// Records in the roster.
    pub entry_count: u32,
    /// Slots requiring two employees.
    pub double_slot_count: u32,
    /// Slots worked per configured employee (zero included).
    pub totals: BTreeMap<String, u32>,
    /// Difference between the busiest and idlest pool employee.
    pub pool_spread: u32,
    /// Slots worked by the rotating employee, ascending.
    pub rotating_slots: Vec<Slot>,
}

impl RosterKpi {
    /// Computes KPIs from a roster and its configuration.
    pub fn calculate(roster: &Roster, config: &RosterConfig) -> Self {
        let horizon = config.horizon();
        let requirements = config.periods.requirements(&horizon);
        let worked = roster.totals();

        let totals: BTreeMap<String, u32> = config
            .employees
            .iter()
            .map(|id| (id.clone(), worked.get(id).copied().unwrap_or(0)))
            .collect();

        let pool_totals: Vec<u32> = config
            .staff()
            .iter()
            .filter(|e| e.is_pool())
            .map(|e| totals[&e.id])
            .collect();
        let pool_spread = match (pool_totals.iter().max(), pool_totals.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        Self {
            total_demand: requirements.iter().sum(),
            entry_count: roster.entry_count() as u32,
            double_slot_count: requirements.iter().filter(|&&r| r == DOUBLE_COVERAGE).count() as u32,
            totals,
            pool_spread,
            rotating_slots: roster.slots_for_employee(&config.rotating),
        }
    }
}
