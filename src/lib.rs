//! Weekend rostering for the U-Engine ecosystem.
//!
//! Assigns employees to weekend slots over a planning horizon so that
//! every slot is staffed exactly as required, one rotating employee
//! works exactly once per cycle, and the remaining pool employees'
//! totals stay within one of each other.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Role`, `Horizon`, `Cycle`,
//!   `CoveragePeriod`, `CoverageTable`, `Roster`, `Violation`
//! - **`config`**: `RosterConfig`, loaded from TOML or JSON
//! - **`validation`**: Configuration integrity checks
//! - **`cp`**: 0-1 constraint model, builder, and solving engine seam
//! - **`scheduler`**: End-to-end pipeline and KPIs
//! - **`output`**: CSV and JSON sinks
//!
//! # Pipeline
//!
//! config → validation → coverage classification → model → solver →
//! decode → verify. Single pass, no shared state.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod config;
pub mod cp;
pub mod error;
pub mod models;
pub mod output;
pub mod scheduler;
pub mod validation;

pub use error::{Result, RosterError};
