//! u-roster CLI - weekend roster solver.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_roster::config::RosterConfig;
use u_roster::cp::SolverConfig;
use u_roster::output;
use u_roster::scheduler::{RosterKpi, RosterScheduler};
use u_roster::validation::validate_config;

#[derive(Parser)]
#[command(name = "u-roster")]
#[command(about = "Weekend roster solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a roster and write it out
    Solve {
        /// Roster configuration (TOML, or JSON by extension)
        #[arg(long, short)]
        config: PathBuf,
        /// CSV output file
        #[arg(long, short, default_value = "scheduling_results.csv")]
        output: PathBuf,
        /// Print roster and KPIs as JSON to stdout instead of writing CSV
        #[arg(long)]
        json: bool,
        /// Wall-clock limit for the solver, in seconds
        #[arg(long)]
        time_limit_secs: Option<u64>,
    },
    /// Validate a configuration and print its coverage demand
    Check {
        /// Roster configuration (TOML, or JSON by extension)
        #[arg(long, short)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            output,
            json,
            time_limit_secs,
        } => {
            let roster_config = RosterConfig::load(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;

            let mut solver_config = SolverConfig::default();
            if let Some(secs) = time_limit_secs {
                solver_config = solver_config.with_time_limit(Duration::from_secs(secs));
            }

            let roster = RosterScheduler::new()
                .with_solver_config(solver_config)
                .schedule(&roster_config)
                .context("No roster produced")?;
            let kpi = RosterKpi::calculate(&roster, &roster_config);

            if json {
                output::write_json(&roster, &kpi, std::io::stdout().lock())?;
            } else {
                output::write_csv_file(&roster, &output)?;
                println!("Scheduling results have been saved to {}", output.display());
                for (employee, total) in &kpi.totals {
                    println!("  {employee}: {total} weekends");
                }
            }
            info!(spread = kpi.pool_spread, "Done");
        }
        Commands::Check { config } => {
            let roster_config = RosterConfig::load(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;

            if let Err(errors) = validate_config(&roster_config) {
                for e in &errors {
                    eprintln!("error: {}", e.message);
                }
                anyhow::bail!("{} configuration error(s)", errors.len());
            }

            let horizon = roster_config.horizon();
            println!("Employees: {}", roster_config.employees.join(", "));
            println!("Rotating:  {}", roster_config.rotating);
            println!(
                "Horizon:   {} slots, {} cycles of {}",
                horizon.length,
                horizon.cycles().len(),
                horizon.cycle_length
            );
            println!(
                "Demand:    {} employee-slots ({} double-staffed slots)",
                roster_config.periods.total_demand(&horizon),
                roster_config.periods.double_slots().len()
            );
        }
    }

    Ok(())
}
