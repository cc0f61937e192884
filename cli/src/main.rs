//! allocation-sim: run a budget allocation scenario from the command line
//!
//! Loads a scenario JSON file (organizations, per-estimator utility curves,
//! configuration), runs the allocation engine, and renders the result: the
//! per-chunk narrative, per-organization totals with shares, and the
//! per-estimator breakdown.
//!
//! ```text
//! allocation-sim scenario.json
//! allocation-sim scenario.json --num-chunks 1000 --quiet
//! allocation-sim scenario.json --json > result.json
//! allocation-sim scenario.json --fingerprint
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use uuid::Uuid;

use allocation_simulator_core_rs::{
    result_fingerprint, AllocationEngine, Scenario, SimulationResult,
};

#[derive(Parser, Debug)]
#[command(
    name = "allocation-sim",
    about = "Greedy budget allocation over estimator utility curves",
    version
)]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Override the scenario's total budget
    #[arg(long)]
    total_dollars: Option<f64>,

    /// Override the scenario's chunk count
    #[arg(long)]
    num_chunks: Option<usize>,

    /// Emit the raw result as JSON instead of the narrative
    #[arg(long)]
    json: bool,

    /// Print the result fingerprint (for comparing runs)
    #[arg(long)]
    fingerprint: bool,

    /// Suppress the per-chunk narrative, print totals only
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.scenario)
        .with_context(|| format!("failed to read scenario {}", args.scenario.display()))?;
    let mut scenario = Scenario::from_json(&raw)
        .with_context(|| format!("failed to parse scenario {}", args.scenario.display()))?;

    if let Some(total_dollars) = args.total_dollars {
        scenario.configuration.total_dollars = total_dollars;
    }
    if let Some(num_chunks) = args.num_chunks {
        scenario.configuration.num_chunks = num_chunks;
    }

    let configuration = scenario.configuration;
    let org_names: Vec<(i64, String)> = scenario
        .organizations
        .iter()
        .map(|org| (org.id, org.name.clone()))
        .collect();

    let result = AllocationEngine::from_scenario(scenario)
        .context("scenario rejected by the allocation engine")?
        .run()
        .context("simulation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Run {} (scenario {})",
        Uuid::new_v4(),
        args.scenario.display()
    );
    println!(
        "Budget ${:.2} in {} chunks of ${:.2}",
        configuration.total_dollars,
        configuration.num_chunks,
        configuration.chunk_size()
    );
    println!();

    if !args.quiet {
        for line in result.log.render_lines() {
            println!("{}", line);
        }
        println!();
    }

    print_totals(&org_names, &result);

    if result.partial {
        println!();
        println!(
            "WARNING: run stopped after {} rounds with ${:.2} unallocated",
            result.rounds, result.funds_remaining
        );
    }

    if args.fingerprint {
        println!();
        println!("fingerprint: {}", result_fingerprint(&result)?);
    }

    Ok(())
}

fn print_totals(org_names: &[(i64, String)], result: &SimulationResult) {
    let breakdown = result.breakdown();

    println!("Final allocations:");
    for (org_id, name) in org_names {
        let amount = result.allocations.get(org_id).copied().unwrap_or(0.0);
        println!(
            "  {} (#{}): ${:.2} ({:.1}%)",
            name,
            org_id,
            amount,
            result.share_of(*org_id) * 100.0
        );
    }

    println!();
    println!("Breakdown by estimator:");
    for (org_id, name) in org_names {
        let Some(per_estimator) = breakdown.get(org_id) else {
            continue;
        };
        if per_estimator.is_empty() {
            continue;
        }
        println!("  {} (#{}):", name, org_id);
        for (estimator_id, amount) in per_estimator {
            println!("    {}: ${:.2}", estimator_id, amount);
        }
    }
}
