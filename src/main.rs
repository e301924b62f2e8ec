//! craftplan - Command Line Interface
//!
//! Loads a crafting ruleset, searches for a plan and prints it.
//! Run with `--help` to see all available options.

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use craftplan::{Planner, RuleSet, SearchOutcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicChoice {
    /// Uniform-cost search
    Zero,
    /// Minecraft crafting tie-break policy
    Crafting,
}

/// Command-line arguments for craftplan.
#[derive(Parser, Debug)]
#[command(name = "craftplan")]
#[command(author, version, about = "Find a low-cost crafting plan for a ruleset", long_about = None)]
struct Args {
    /// Ruleset file (JSON)
    #[arg(default_value = "Crafting.json")]
    ruleset: PathBuf,

    /// Search time budget in seconds
    #[arg(short, long, default_value = "30")]
    time_limit: f64,

    /// Heuristic strategy biasing the search
    #[arg(long, value_enum, default_value = "crafting")]
    heuristic: HeuristicChoice,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let time_limit = Duration::try_from_secs_f64(args.time_limit)
        .map_err(|e| format!("invalid time limit {}: {}", args.time_limit, e))?;

    let problem = RuleSet::from_path(&args.ruleset)?.compile()?;
    let planner = Planner::new(problem).with_time_limit(time_limit);
    let planner = match args.heuristic {
        HeuristicChoice::Zero => planner,
        HeuristicChoice::Crafting => planner.with_crafting_heuristic(),
    };

    let items = planner.problem().items();
    match planner.plan()? {
        SearchOutcome::Found(plan) => {
            for step in plan.steps() {
                println!("\t{}", step.state.display(items));
                println!("{}", step.action);
            }
            println!();
            println!("time-cost = {}", plan.total_cost());
            println!("length = {}", plan.len());
            println!(
                "searched {} states in {:.3}s",
                plan.stats().expanded,
                plan.stats().elapsed.as_secs_f64()
            );
        }
        SearchOutcome::TimedOut(stats) => {
            eprintln!(
                "Failed to find a plan from {} within {:.3}s ({} states expanded)",
                planner.problem().initial_state().display(items),
                stats.elapsed.as_secs_f64(),
                stats.expanded
            );
            process::exit(1);
        }
        SearchOutcome::Exhausted(stats) => {
            eprintln!(
                "No plan exists from {}: explored all {} reachable states",
                planner.problem().initial_state().display(items),
                stats.expanded
            );
            process::exit(2);
        }
    }

    Ok(())
}
