//! Knapsack Genealogy CLI - Run a tracked evolution from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::process;

use knapsack_genealogy::{EvolutionEngine, RunConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.get(1).is_some_and(|a| a == "--example") {
        print_example_config();
        return;
    }
    if args.get(1).is_some_and(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [config.json]", args[0]);
        eprintln!();
        eprintln!("Evolve knapsacks and record their genealogy.");
        eprintln!("Without a configuration file the default run is used.");
        eprintln!("Print the default configuration with --example.");
        process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => load_config(PathBuf::from(path)),
        None => RunConfig::default(),
    };

    let mut engine = match EvolutionEngine::with_graph(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to set up run: {}", e);
            process::exit(1);
        }
    };

    println!("ITEMS");
    print!("{}", engine.catalog());
    println!();

    let result = match engine.run() {
        Ok(result) => result,
        Err(e) => {
            log::error!("Run aborted: {}", e);
            process::exit(1);
        }
    };

    println!("Knapsack Evolution");
    println!("==================");
    println!("Generations:       {}", result.stats.generations);
    println!("Evaluations:       {}", result.stats.total_evaluations);
    println!("Individuals:       {}", result.stats.individuals_deployed);
    println!("Genealogy edges:   {}", engine.tracker().edges().len());
    println!("Elapsed:           {:.2}s", result.stats.elapsed_seconds);

    if let Some(best) = &result.best {
        println!();
        println!("Best knapsack {} {:?}", best.concrete_id, best.contents);
        if let Some(fitness) = best.fitness {
            println!(
                "  weight={:.1} value={:.3} score={:.3}",
                fitness.weight,
                fitness.value,
                fitness.score()
            );
        }
    }

    if let Some(path) = engine.tracker().output_path() {
        println!("Genealogy written to {}", path.display());
    }
}

fn load_config(path: PathBuf) -> RunConfig {
    let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        process::exit(1);
    });

    serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        process::exit(1);
    })
}

fn print_example_config() {
    let config = RunConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding config: {}", e);
            process::exit(1);
        }
    }
}
