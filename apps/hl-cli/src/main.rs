use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hl_lti::{StepOptions, bode, logspace, root_locus};
use hl_loop::{
    DEFAULT_TOLERANCE, LoopError, LoopResult, PlantConstants, Scenario, build_analytical_with_plant,
    build_with_plant, compare_responses, cross_check, load_plant, standard_scenarios, tabulate,
};

#[derive(Parser)]
#[command(name = "hl-cli")]
#[command(about = "HydroLoop CLI - Reservoir level loop analysis tool", long_about = None)]
struct Cli {
    /// Plant constants YAML file (reference plant if omitted)
    #[arg(long, global = true)]
    plant: Option<PathBuf>,
    /// Tolerance on each step characteristic when comparing builders
    #[arg(long, global = true, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the step info table for the standard scenarios
    Table {
        /// Emit JSON instead of an aligned text table
        #[arg(long)]
        json: bool,
    },
    /// Cross-check block-built and analytical closed loops
    Verify {
        /// Write overlaid step responses as scenario_<n>.csv
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Print closed-loop poles per scenario
    Poles,
    /// Print open-loop Bode samples as CSV
    Bode {
        /// Scenario number (1-based, as listed by `table`)
        #[arg(long)]
        scenario: usize,
        /// Number of logarithmically spaced frequencies
        #[arg(long, default_value_t = 60)]
        points: usize,
    },
    /// Print root-locus poles for a gain sweep as CSV
    Locus {
        /// Scenario number (1-based, as listed by `table`)
        #[arg(long)]
        scenario: usize,
    },
}

fn main() -> LoopResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let plant = match &cli.plant {
        Some(path) => load_plant(path)?,
        None => PlantConstants::default(),
    };

    match cli.command {
        Commands::Table { json } => cmd_table(&plant, json),
        Commands::Verify { export_dir } => {
            cmd_verify(&plant, cli.tolerance, export_dir.as_deref())
        }
        Commands::Poles => cmd_poles(&plant),
        Commands::Bode { scenario, points } => cmd_bode(&plant, scenario, points),
        Commands::Locus { scenario } => cmd_locus(&plant, scenario),
    }
}

fn cmd_table(plant: &PlantConstants, json: bool) -> LoopResult<()> {
    let table = tabulate(plant, &standard_scenarios(), &StepOptions::default())?;
    if json {
        let text = serde_json::to_string_pretty(&table)
            .map_err(|e| LoopError::Serialization(format!("Failed to encode table: {}", e)))?;
        println!("{}", text);
    } else {
        print!("{}", table);
    }
    Ok(())
}

fn cmd_verify(plant: &PlantConstants, tolerance: f64, export_dir: Option<&Path>) -> LoopResult<()> {
    let scenarios = standard_scenarios();
    let opts = StepOptions::default();

    let failed: Vec<String> = match export_dir {
        None => cross_check(plant, &scenarios, tolerance, &opts)?
            .into_iter()
            .inspect(|check| {
                let cmp = &check.comparison;
                print_check(&check.label, cmp.is_match, &cmp.mismatches());
            })
            .filter(|check| !check.comparison.is_match)
            .map(|check| check.label)
            .collect(),
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let mut failed = Vec::new();
            for (idx, scenario) in scenarios.iter().enumerate() {
                let built = build_with_plant(plant, &scenario.gains)?;
                let analytical = build_analytical_with_plant(plant, &scenario.gains)?;
                let rc = compare_responses(&built.closed_loop, &analytical, tolerance, &opts)?;
                print_check(&scenario.label, rc.comparison.is_match, &rc.comparison.mismatches());

                let mut csv = String::from("time_s,built,analytical\n");
                for ((t, a), b) in rc.left.t.iter().zip(&rc.left.y).zip(&rc.right.y) {
                    csv.push_str(&format!("{},{},{}\n", t, a, b));
                }
                let path = dir.join(format!("scenario_{}.csv", idx + 1));
                std::fs::write(&path, csv)?;

                if !rc.comparison.is_match {
                    failed.push(scenario.label.clone());
                }
            }
            println!("Exported step responses to {}", dir.display());
            failed
        }
    };

    if failed.is_empty() {
        println!("✓ All {} scenarios match", scenarios.len());
        Ok(())
    } else {
        Err(LoopError::Mismatch(failed.join(", ")))
    }
}

fn print_check(label: &str, is_match: bool, mismatches: &[&str]) {
    if is_match {
        println!("  MATCH     {}", label);
    } else {
        println!("  MISMATCH  {} ({})", label, mismatches.join(", "));
    }
}

fn cmd_poles(plant: &PlantConstants) -> LoopResult<()> {
    for scenario in standard_scenarios() {
        let loops = build_with_plant(plant, &scenario.gains)?;
        let poles = loops.closed_loop.cancel_origin().poles();
        println!("{}:", scenario.label);
        for p in poles {
            if p.im == 0.0 {
                println!("  {:.6}", p.re);
            } else {
                println!("  {:.6} {:+.6}j", p.re, p.im);
            }
        }
    }
    Ok(())
}

fn select_scenario(number: usize) -> LoopResult<Scenario> {
    let mut scenarios = standard_scenarios();
    if number == 0 || number > scenarios.len() {
        return Err(LoopError::InvalidArg {
            what: "scenario number must be between 1 and 7",
        });
    }
    Ok(scenarios.swap_remove(number - 1))
}

fn cmd_bode(plant: &PlantConstants, number: usize, points: usize) -> LoopResult<()> {
    let scenario = select_scenario(number)?;
    let loops = build_with_plant(plant, &scenario.gains)?;
    let samples = bode(&loops.open_loop, &logspace(-2.0, 3.0, points))?;

    let mut csv = String::from("omega_rad_s,magnitude_db,phase_deg\n");
    for p in samples {
        csv.push_str(&format!("{},{},{}\n", p.omega, p.magnitude_db, p.phase_deg));
    }
    print!("{}", csv);
    Ok(())
}

fn cmd_locus(plant: &PlantConstants, number: usize) -> LoopResult<()> {
    let scenario = select_scenario(number)?;
    let loops = build_with_plant(plant, &scenario.gains)?;
    let gains = logspace(-2.0, 3.0, 51);
    let locus = root_locus(&loops.open_loop, &gains)?;

    let mut csv = String::from("gain,re,im\n");
    for point in locus {
        for p in &point.poles {
            csv.push_str(&format!("{},{},{}\n", point.gain, p.re, p.im));
        }
    }
    print!("{}", csv);
    Ok(())
}
