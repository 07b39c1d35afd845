use clap::{Parser, Subcommand};
use kernel_sim::internal::{
    config::load_config,
    kernel::Kernel,
    scenario::{Scenario, ScenarioReport},
};
use std::{fs, path::Path};

#[derive(Parser)]
#[command(name = "kernelctl")]
#[command(about = "Kernel simulator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Path to the scenario file (JSON)
        #[arg(short, long)]
        scenario_file: String,

        /// Output file for the JSON report
        #[arg(short, long)]
        out: Option<String>,

        /// Real milliseconds per simulated unit (overrides config)
        #[arg(long)]
        unit_cost_ms: Option<u64>,
    },
    /// Run the built-in two-process demo and print its transcript
    Demo {
        /// Real milliseconds per simulated unit (overrides config)
        #[arg(long)]
        unit_cost_ms: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            scenario_file,
            out,
            unit_cost_ms,
        } => {
            run_scenario(scenario_file, out, *unit_cost_ms)?;
        }
        Commands::Demo { unit_cost_ms } => {
            run_demo(*unit_cost_ms);
        }
    }

    Ok(())
}

fn execute(scenario: &Scenario, unit_cost_ms: Option<u64>) -> ScenarioReport {
    let mut config = scenario.kernel_config(&load_config());
    if let Some(ms) = unit_cost_ms {
        config.unit_cost_ms = ms;
    }

    let mut kernel = Kernel::from_config(&config);
    scenario.execute(&mut kernel)
}

fn run_scenario(
    scenario_file: &str,
    out: &Option<String>,
    unit_cost_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_path(Path::new(scenario_file))
        .map_err(|e| format!("Scenario {} rejected: {}", scenario_file, e))?;

    let report = execute(&scenario, unit_cost_ms);
    let output = serde_json::to_string_pretty(&report)?;

    if let Some(out_path) = out {
        fs::write(out_path, output)?;
        println!(
            "Scenario completed ({} steps). Report written to {}",
            report.outcomes.len(),
            out_path
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn run_demo(unit_cost_ms: Option<u64>) {
    let report = execute(&Scenario::reference(), unit_cost_ms);
    for line in report.transcript() {
        println!("{}", line);
    }
}
