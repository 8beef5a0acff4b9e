//! Forest generation utility
//!
//! Generates a forest, renders one frame into a counting renderer and an
//! instance batcher, and prints a summary.
//!
//! Usage:
//!     generate_forest [OPTIONS]
//!
//! Options:
//!     -c, --config <FILE>         Load forest configuration from JSON
//!     -w, --write-config <FILE>   Write the effective configuration to JSON
//!     --seed <SEED>               RNG seed (default: 12345)
//!     -n, --count <N>             Target number of trees (default: 70, max: 300)
//!     -i, --iterations <N>        Grammar iterations (default: 3, max: 6)
//!     -p, --param <NAME=VALUE>    Set any named parameter (repeatable)
//!     -h, --help                  Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use grove::core::{logging, OrbitCamera};
use grove::forest::{Forest, ForestConfig};
use grove::lsystem::GrammarPreset;
use grove::render::{FrameStats, InstanceBatcher, MeshKind};

fn print_help() {
    eprintln!("generate_forest - L-system forest generation utility");
    eprintln!();
    eprintln!("Usage: generate_forest [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>         Load forest configuration from JSON");
    eprintln!("    -w, --write-config <FILE>   Write the effective configuration to JSON");
    eprintln!("    --seed <SEED>               RNG seed (default: 12345)");
    eprintln!("    -n, --count <N>             Target number of trees (default: 70, max: 300)");
    eprintln!("    -i, --iterations <N>        Grammar iterations (default: 3, max: 6)");
    eprintln!("    -p, --param <NAME=VALUE>    Set any named parameter (repeatable)");
    eprintln!("    -h, --help                  Show this help message");
    eprintln!();
    eprintln!("Parameters: iterations, angle, length, trunk_scale, taper, branch_scale,");
    eprintln!("            leaf_density, num_trees");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    generate_forest --seed 42 -n 30");
    eprintln!("    generate_forest -c forest.json -p angle=35 -p leaf_density=0.5");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    write_config: Option<PathBuf>,
    seed: Option<u64>,
    count: Option<usize>,
    iterations: Option<u32>,
    params: Vec<(String, f64)>,
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                parsed.config = Some(PathBuf::from(next_value(&args, &mut i, flag)?));
            }
            "-w" | "--write-config" => {
                parsed.write_config = Some(PathBuf::from(next_value(&args, &mut i, flag)?));
            }
            "--seed" => {
                let v = next_value(&args, &mut i, flag)?;
                parsed.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {}", v))?);
            }
            "-n" | "--count" => {
                let v = next_value(&args, &mut i, flag)?;
                parsed.count = Some(v.parse().map_err(|_| format!("Invalid count: {}", v))?);
            }
            "-i" | "--iterations" => {
                let v = next_value(&args, &mut i, flag)?;
                parsed.iterations = Some(v.parse().map_err(|_| format!("Invalid iterations: {}", v))?);
            }
            "-p" | "--param" => {
                let v = next_value(&args, &mut i, flag)?;
                let (name, number) = v
                    .split_once('=')
                    .ok_or_else(|| format!("Expected NAME=VALUE, got: {}", v))?;
                let number: f64 = number
                    .parse()
                    .map_err(|_| format!("Invalid value for {}: {}", name, number))?;
                parsed.params.push((name.to_string(), number));
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn build_config(args: &Args) -> grove::core::Result<ForestConfig> {
    let mut config = match &args.config {
        Some(path) => ForestConfig::load_sync(path)?,
        None => ForestConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(count) = args.count {
        config.target_count = count;
    }
    if let Some(iterations) = args.iterations {
        config.set_param("iterations", f64::from(iterations))?;
    }
    for (name, value) in &args.params {
        config.set_param(name, *value)?;
    }

    config.validate()?;
    Ok(config)
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.write_config {
        if let Err(e) = config.save_sync(path) {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
        println!("Wrote configuration to {}", path.display());
    }

    println!("Forest Generation Utility");
    println!("=========================");
    println!("Seed: {}", config.seed);
    println!("Target trees: {}", config.target_count);
    println!("Ground: {}m half size, {}m min separation", config.ground_half_size, config.min_separation);
    println!("Iterations: {}  Angle: {}°  Leaf density: {}",
             config.tree.iterations, config.tree.angle, config.tree.leaf_density);
    println!();

    let start = Instant::now();
    let forest = match Forest::new(config) {
        Ok(forest) => forest,
        Err(e) => {
            eprintln!("Error generating forest: {}", e);
            std::process::exit(1);
        }
    };
    let generate_elapsed = start.elapsed();

    let camera = OrbitCamera::default();
    let mut stats = FrameStats::new();
    let mut batcher = InstanceBatcher::new();

    let start = Instant::now();
    forest.render(&mut stats, &camera);
    forest.render(&mut batcher, &camera);
    let render_elapsed = start.elapsed();

    let truncated = forest.trees().iter().filter(|t| t.expanded().is_truncated()).count();

    println!("Trees by preset:");
    for preset in GrammarPreset::ALL {
        let count = forest.trees().iter().filter(|t| t.preset() == preset).count();
        println!("  {:<10} {}", preset.name(), count);
    }
    println!();
    println!("Summary:");
    println!("  Trees placed: {} of {}", forest.len(), forest.config().target_count);
    println!("  Branch instances: {}", stats.branches);
    println!("  Leaf instances: {}", stats.leaves);
    println!("  Instance upload: {} KiB",
             (batcher.as_bytes(MeshKind::Branch).len()
                 + batcher.as_bytes(MeshKind::Leaf).len()
                 + batcher.as_bytes(MeshKind::Ground).len()) / 1024);
    if truncated > 0 {
        println!("  Truncated expansions: {}", truncated);
    }
    println!("  Generation time: {:.2}ms", generate_elapsed.as_secs_f64() * 1000.0);
    println!("  Frame build time (x2): {:.2}ms", render_elapsed.as_secs_f64() * 1000.0);
}
