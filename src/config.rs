//! Roster configuration.
//!
//! Everything the core needs arrives here: the ordered employee list,
//! the rotating employee, horizon and cycle lengths, and the coverage
//! period table. Nothing is hardcoded downstream.
//!
//! # File Format
//!
//! ```toml
//! employees = ["A", "B", "C", "D"]
//! rotating = "D"
//! horizon = 52        # optional, default 52
//! cycle_length = 16   # optional, default 16
//!
//! [[periods]]
//! label = "april"
//! slots = [14, 15, 16, 17]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::{
    CoveragePeriod, CoverageTable, Employee, Horizon, Role, DEFAULT_CYCLE_LENGTH,
    DEFAULT_HORIZON,
};

/// Static input of one rostering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Employee identifiers, in output order.
    pub employees: Vec<String>,
    /// Identifier of the rotating employee.
    pub rotating: String,
    /// Number of weekend slots.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
    /// Slots per rotation cycle.
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    /// Double-staffed periods.
    #[serde(default)]
    pub periods: CoverageTable,
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

impl RosterConfig {
    /// Creates a configuration with default horizon and cycle length
    /// and no double-staffed periods.
    pub fn new<I, S>(employees: I, rotating: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            employees: employees.into_iter().map(Into::into).collect(),
            rotating: rotating.into(),
            horizon: DEFAULT_HORIZON,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            periods: CoverageTable::new(),
        }
    }

    /// Sets the horizon length.
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the rotation cycle length.
    pub fn with_cycle_length(mut self, cycle_length: u32) -> Self {
        self.cycle_length = cycle_length;
        self
    }

    /// Adds a double-staffed period.
    pub fn with_period(mut self, period: CoveragePeriod) -> Self {
        self.periods.periods.push(period);
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a configuration file.
    ///
    /// `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::debug!(path = %path.display(), employees = config.employees.len(), "Loaded roster config");
        Ok(config)
    }

    /// The planning horizon.
    pub fn horizon(&self) -> Horizon {
        Horizon::new(self.horizon, self.cycle_length)
    }

    /// Employees with their role tags, in configuration order.
    pub fn staff(&self) -> Vec<Employee> {
        self.employees
            .iter()
            .map(|id| {
                let role = if *id == self.rotating {
                    Role::Rotating
                } else {
                    Role::Pool
                };
                Employee::new(id.clone(), role)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let c = RosterConfig::new(["A", "B", "C", "D"], "D");
        assert_eq!(c.horizon, 52);
        assert_eq!(c.cycle_length, 16);
        assert!(c.periods.is_empty());
        assert_eq!(c.horizon().cycles().len(), 4);
    }

    #[test]
    fn test_staff_roles() {
        let c = RosterConfig::new(["A", "B", "D"], "D");
        let staff = c.staff();
        assert_eq!(staff.len(), 3);
        assert_eq!(staff[0].role, Role::Pool);
        assert_eq!(staff[2].role, Role::Rotating);
    }

    #[test]
    fn test_from_toml() {
        let c = RosterConfig::from_toml_str(
            r#"
            employees = ["A", "B", "C", "D"]
            rotating = "D"
            horizon = 8
            cycle_length = 8

            [[periods]]
            label = "spring"
            slots = [3, 4]
            "#,
        )
        .unwrap();
        assert_eq!(c.horizon, 8);
        assert_eq!(c.periods.periods.len(), 1);
        assert_eq!(c.periods.periods[0].label, "spring");
        assert_eq!(c.periods.required_at(4), 2);
    }

    #[test]
    fn test_from_toml_defaults() {
        let c = RosterConfig::from_toml_str(
            r#"
            employees = ["A", "D"]
            rotating = "D"
            "#,
        )
        .unwrap();
        assert_eq!(c.horizon, 52);
        assert_eq!(c.cycle_length, 16);
        assert!(c.periods.is_empty());
    }

    #[test]
    fn test_from_json() {
        let c = RosterConfig::from_json_str(
            r#"{"employees":["A","D"],"rotating":"D","horizon":4,
                "periods":[{"label":"x","slots":[1]}]}"#,
        )
        .unwrap();
        assert_eq!(c.horizon, 4);
        assert_eq!(c.cycle_length, 16);
        assert_eq!(c.periods.double_slots().len(), 1);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(RosterConfig::from_toml_str("employees = 3").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, "employees = [\"A\", \"D\"]\nrotating = \"D\"\nhorizon = 4\n").unwrap();
        let c = RosterConfig::load(&path).unwrap();
        assert_eq!(c.horizon, 4);

        let missing = RosterConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(crate::RosterError::Io(_))));
    }
}
