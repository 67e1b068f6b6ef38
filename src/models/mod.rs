//! Rostering domain models.
//!
//! Provides the core data types for weekend rostering problems and
//! their solutions.
//!
//! # Domain Mappings
//!
//! | u-roster | Weekend on-call | Clinic | Retail |
//! |----------|-----------------|--------|--------|
//! | Employee | Engineer | Nurse | Shift lead |
//! | Slot | Weekend | Saturday clinic | Saturday |
//! | CoveragePeriod | Release freeze | Flu season | Holiday sales |
//! | Roster | On-call rota | Clinic rota | Store rota |

mod coverage;
mod employee;
mod horizon;
mod roster;

pub use coverage::{CoveragePeriod, CoverageTable, DOUBLE_COVERAGE, SINGLE_COVERAGE};
pub use employee::{Employee, Role};
pub use horizon::{Cycle, Horizon, Slot, DEFAULT_CYCLE_LENGTH, DEFAULT_HORIZON};
pub use roster::{Roster, RosterEntry, Violation, ViolationType};
