//! Roster output sinks.
//!
//! CSV output keeps the `Employee,Weekend` header and one row per
//! record, in roster order. JSON output carries the roster together
//! with its KPI summary.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Roster, Slot};
use crate::scheduler::RosterKpi;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Employee")]
    employee: &'a str,
    #[serde(rename = "Weekend")]
    weekend: Slot,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    roster: &'a Roster,
    kpi: &'a RosterKpi,
}

/// Writes the roster as CSV.
pub fn write_csv<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if roster.is_empty() {
        wtr.write_record(["Employee", "Weekend"])?;
    }
    for entry in &roster.entries {
        wtr.serialize(CsvRow {
            employee: &entry.employee,
            weekend: entry.slot,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the roster as CSV to a file, replacing it.
pub fn write_csv_file(roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(roster, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.as_ref().display(), rows = roster.entry_count(), "Wrote roster CSV");
    Ok(())
}

/// Writes the roster and its KPIs as pretty-printed JSON.
pub fn write_json<W: Write>(roster: &Roster, kpi: &RosterKpi, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonReport { roster, kpi })?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use crate::models::RosterEntry;

    fn sample() -> Roster {
        let mut r = Roster::new();
        r.add_entry(RosterEntry::new("A", 2));
        r.add_entry(RosterEntry::new("D", 1));
        r
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Employee,Weekend\nA,2\nD,1\n");
    }

    #[test]
    fn test_csv_empty_has_header() {
        let mut buf = Vec::new();
        write_csv(&Roster::new(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Employee,Weekend\n");
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv_file(&sample(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_json_output() {
        let config = RosterConfig::new(["A", "D"], "D").with_horizon(2).with_cycle_length(2);
        let roster = sample();
        let kpi = RosterKpi::calculate(&roster, &config);
        let mut buf = Vec::new();
        write_json(&roster, &kpi, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["roster"]["entries"][0]["employee"], "A");
        assert_eq!(value["kpi"]["total_demand"], 2);
        assert_eq!(value["kpi"]["rotating_slots"][0], 1);
    }
}
