use anyhow::{anyhow, Result};
use clap::{arg, Command};
use qkp_problem::{load_instance, render_instance, Instance};
use qkp_search::{Algorithm, Candidate};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

mod batch;

fn cli() -> Command {
    Command::new("qkp-runtime")
        .about("Runs quantum-inspired knapsack heuristics")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Runs one seeded search")
                .arg(
                    arg!(<SETTINGS> "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the run")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report is saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Averages many seeded runs per settings document")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SETTINGS> ... "Settings json strings or paths to json files")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--runs [RUNS] "Independent runs per settings document")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--seed [SEED] "Base seed; run i uses seed + i")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report is saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Checks a solution against an instance")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Writes a synthetic instance in the text format")
                .arg(arg!(<NUM_ITEMS> "Number of items").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--"max-coefficient" [MAX_COEFFICIENT] "Upper bound for values and weights")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for instance generation")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the instance is saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("compare", sub_m)) => compare(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m
                .get_many::<String>("SETTINGS")
                .unwrap()
                .cloned()
                .collect(),
            *sub_m.get_one::<u64>("runs").unwrap(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<usize>("NUM_ITEMS").unwrap(),
            *sub_m.get_one::<u32>("max-coefficient").unwrap(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Serialize, Debug)]
struct ReportSolution {
    items: Vec<usize>,
    value: u64,
    weight: u64,
}

impl ReportSolution {
    fn new(candidate: &Candidate) -> ReportSolution {
        ReportSolution {
            items: candidate.items(),
            value: candidate.value,
            weight: candidate.weight,
        }
    }
}

#[derive(Serialize, Debug)]
struct SolveReport {
    algorithm: String,
    seed: u64,
    best: ReportSolution,
    found_at: Option<u32>,
    history: Vec<u64>,
}

#[derive(Serialize, Debug)]
struct CompareReport {
    algorithm: String,
    runs: u64,
    best: ReportSolution,
    best_seed: u64,
    mean_history: Vec<f64>,
}

#[derive(Deserialize, Debug)]
struct SolutionDoc {
    items: Vec<usize>,
}

pub fn solve(
    settings: String,
    instance_path: PathBuf,
    seed: u64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let algorithm = load_settings(&settings)?;
    let instance = load_instance(&instance_path)?;
    let outcome = algorithm.run(&instance, seed)?;

    let report = SolveReport {
        algorithm: algorithm.name().to_string(),
        seed,
        best: ReportSolution::new(&outcome.best),
        found_at: outcome.found_at,
        history: outcome.history,
    };
    emit(&serde_json::to_string(&report)?, output_file)
}

pub fn compare(
    instance_path: PathBuf,
    settings_list: Vec<String>,
    runs: u64,
    base_seed: u64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let mut reports = Vec::with_capacity(settings_list.len());
    for settings in &settings_list {
        let algorithm = load_settings(settings)?;
        let outcomes = batch::run_batch(&algorithm, &instance, runs, base_seed)?;
        let (best_run, best) = batch::best_outcome(&outcomes);
        reports.push(CompareReport {
            algorithm: algorithm.name().to_string(),
            runs,
            best: ReportSolution::new(&best.best),
            best_seed: base_seed.wrapping_add(best_run as u64),
            mean_history: batch::mean_history(&outcomes)?,
        });
    }
    emit(&serde_json::to_string(&reports)?, output_file)
}

pub fn verify(instance_path: PathBuf, solution: String) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let solution = load_solution(&solution)?;
    match instance.verify_items(&solution.items) {
        Ok((value, weight)) => {
            println!("Solution is valid (value: {}, weight: {})", value, weight);
            Ok(())
        }
        Err(e) => Err(anyhow!("Invalid solution: {}", e)),
    }
}

pub fn generate(
    num_items: usize,
    max_coefficient: u32,
    seed: u64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let instance = Instance::generate(seed, num_items, max_coefficient)?;
    emit(&render_instance(&instance), output_file)
}

fn emit(content: &str, output_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        fs::write(&path, content)?;
        println!("written to: {:?}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn load_settings(settings: &str) -> Result<Algorithm> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .map_err(|e| anyhow!("Failed to read settings file '{}': {}", settings, e))?
    } else {
        settings.to_string()
    };
    serde_json::from_str(&settings).map_err(|e| anyhow!("Failed to parse settings: {}", e))
}

fn load_solution(solution: &str) -> Result<SolutionDoc> {
    let solution = if solution.ends_with(".json") {
        fs::read_to_string(solution)
            .map_err(|e| anyhow!("Failed to read solution file '{}': {}", solution, e))?
    } else {
        solution.to_string()
    };
    serde_json::from_str(&solution).map_err(|e| anyhow!("Failed to parse solution: {}", e))
}
