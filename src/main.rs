//! trade-digitisation-engine CLI
//!
//! Compute the impact of digitising trade payables from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Report for the built-in defaults
//! trade-digitisation-engine compute
//!
//! # Report for a parameters file, as JSON
//! trade-digitisation-engine compute --input params.json --format json
//!
//! # Edit a persisted snapshot and print the updated report
//! trade-digitisation-engine set --store ./snapshots termExtension=45 scfRate=5.5
//!
//! # Sweep one input
//! trade-digitisation-engine sweep --field supplierUptakePct --from 0 --to 100 --steps 10
//! ```

use serde_json::Value;
use std::fs;
use std::process;
use trade_digitisation_engine::core::params::InputParameters;
use trade_digitisation_engine::engine::calculation::CalculationEngine;
use trade_digitisation_engine::report::format::{format_currency, format_multiple, format_number};
use trade_digitisation_engine::report::statement::ImpactReport;
use trade_digitisation_engine::simulation::sensitivity::{sensitivity_sweep, MAX_SWEEP_STEPS};
use trade_digitisation_engine::simulation::stress_test::{
    generate_random_parameters, ParameterRanges,
};
use trade_digitisation_engine::snapshot::codec::SnapshotCodec;
use trade_digitisation_engine::snapshot::session::SimulatorSession;
use trade_digitisation_engine::snapshot::store::{JsonFileStore, DEFAULT_SNAPSHOT_KEY};

fn print_usage() {
    eprintln!(
        r#"trade-digitisation-engine: financial impact of digitising trade payables

USAGE:
    trade-digitisation-engine <COMMAND> [OPTIONS]

COMMANDS:
    compute     Print the impact report for a parameter set
    set         Edit fields of a persisted snapshot, then print the report
    sweep       Recompute key outputs across a range of one input
    defaults    Print the default parameters as a snapshot record
    generate    Generate a random parameter set (for testing)
    help        Show this message

OPTIONS (compute, sweep):
    --input <FILE>      JSON parameters file (camelCase keys; missing keys use defaults)
    --store <DIR>       Read parameters from the snapshot store in DIR instead
    --key <KEY>         Snapshot key (default: tradeSimulator)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (set):
    --store <DIR>       Snapshot store directory (required)
    --key <KEY>         Snapshot key (default: tradeSimulator)
    <FIELD>=<VALUE>     One or more edits; unparsable values become 0

OPTIONS (sweep):
    --field <FIELD>     Input to vary (required)
    --from <N>          First value (required)
    --to <N>            Last value (required)
    --steps <N>         Number of intervals (default: 10, max: 10000)

OPTIONS (generate):
    --seed <N>          Seed for reproducible output
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    trade-digitisation-engine compute --input params.json
    trade-digitisation-engine compute --store ./snapshots --format json
    trade-digitisation-engine set --store ./snapshots termExtension=45
    trade-digitisation-engine sweep --field earlyPaymentDiscount --from 0 --to 10 --steps 5
    trade-digitisation-engine generate --seed 7 --output random.json"#
    );
}

/// Options shared by commands that read a parameter set.
#[derive(Default)]
struct SourceOptions {
    input: Option<String>,
    store: Option<String>,
    key: Option<String>,
    format: Option<String>,
}

fn required_value(args: &[String], i: usize, flag: &str, hint: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, hint);
        process::exit(1);
    })
}

fn parse_number(value: &str, flag: &str) -> f64 {
    value.parse().unwrap_or_else(|_| {
        eprintln!("{} requires a number, got '{}'", flag, value);
        process::exit(1);
    })
}

/// Parse one shared option at `args[*i]`; returns false if the flag is not shared.
fn parse_source_option(args: &[String], i: &mut usize, opts: &mut SourceOptions) -> bool {
    match args[*i].as_str() {
        "--input" => {
            *i += 1;
            opts.input = Some(required_value(args, *i, "--input", "a file path"));
        }
        "--store" => {
            *i += 1;
            opts.store = Some(required_value(args, *i, "--store", "a directory"));
        }
        "--key" => {
            *i += 1;
            opts.key = Some(required_value(args, *i, "--key", "a snapshot key"));
        }
        "--format" => {
            *i += 1;
            opts.format = Some(required_value(args, *i, "--format", "'text' or 'json'"));
        }
        _ => return false,
    }
    true
}

fn load_parameters(opts: &SourceOptions) -> InputParameters {
    let defaults = InputParameters::default();

    if let Some(path) = &opts.input {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        });
        let value: Value = serde_json::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Error parsing JSON: {}", e);
            eprintln!("Expected format:");
            eprintln!(r#"{{ "annualVolumeMM": 200, "digitisationPct": 100, "termExtension": 30 }}"#);
            process::exit(1);
        });
        return SnapshotCodec::decode_value(&value, &defaults);
    }

    if let Some(dir) = &opts.store {
        let key = opts.key.as_deref().unwrap_or(DEFAULT_SNAPSHOT_KEY);
        let session = SimulatorSession::open(JsonFileStore::new(dir), key, defaults);
        return session.params().clone();
    }

    defaults
}

#[derive(serde::Serialize)]
struct ComputeOutput<'a> {
    inputs: &'a InputParameters,
    metrics: trade_digitisation_engine::core::metrics::DerivedMetrics,
    warnings: Vec<String>,
}

fn print_report(params: &InputParameters, format: &str) {
    let metrics = CalculationEngine::compute(params);
    let warnings: Vec<String> = params.range_warnings().iter().map(|w| w.to_string()).collect();

    if format == "json" {
        let output = ComputeOutput {
            inputs: params,
            metrics,
            warnings,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
        println!("{}", ImpactReport::new(params, &metrics));
    }
}

fn cmd_compute(args: &[String]) {
    let mut opts = SourceOptions::default();
    let mut i = 0;
    while i < args.len() {
        if !parse_source_option(args, &mut i, &mut opts) {
            eprintln!("Unknown option: {}", args[i]);
            process::exit(1);
        }
        i += 1;
    }

    let params = load_parameters(&opts);
    print_report(&params, opts.format.as_deref().unwrap_or("text"));
}

fn cmd_set(args: &[String]) {
    let mut opts = SourceOptions::default();
    let mut edits: Vec<(String, String)> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if !parse_source_option(args, &mut i, &mut opts) {
            match args[i].split_once('=') {
                Some((field, value)) => edits.push((field.to_string(), value.to_string())),
                None => {
                    eprintln!("Unknown option: {}", args[i]);
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    let dir = opts.store.clone().unwrap_or_else(|| {
        eprintln!("Error: --store <DIR> is required");
        process::exit(1);
    });
    if edits.is_empty() {
        eprintln!("Error: at least one <FIELD>=<VALUE> edit is required");
        process::exit(1);
    }

    let key = opts.key.as_deref().unwrap_or(DEFAULT_SNAPSHOT_KEY);
    let mut session =
        SimulatorSession::open(JsonFileStore::new(&dir), key, InputParameters::default());

    for (field, value) in &edits {
        if let Err(e) = session.set_text(field, value) {
            eprintln!("Error applying {}={}: {}", field, value, e);
            process::exit(1);
        }
    }
    eprintln!("Saved {} edit(s) to '{}' in {}", edits.len(), key, dir);

    print_report(session.params(), opts.format.as_deref().unwrap_or("text"));
}

fn cmd_sweep(args: &[String]) {
    let mut opts = SourceOptions::default();
    let mut field: Option<String> = None;
    let mut from: Option<f64> = None;
    let mut to: Option<f64> = None;
    let mut steps = 10usize;
    let mut i = 0;
    while i < args.len() {
        if parse_source_option(args, &mut i, &mut opts) {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--field" => {
                i += 1;
                field = Some(required_value(args, i, "--field", "a field key"));
            }
            "--from" => {
                i += 1;
                from = Some(parse_number(&required_value(args, i, "--from", "a number"), "--from"));
            }
            "--to" => {
                i += 1;
                to = Some(parse_number(&required_value(args, i, "--to", "a number"), "--to"));
            }
            "--steps" => {
                i += 1;
                steps = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .filter(|&n| n <= MAX_SWEEP_STEPS)
                    .unwrap_or_else(|| {
                        eprintln!("--steps requires a whole number up to {}", MAX_SWEEP_STEPS);
                        process::exit(1);
                    });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (field, from, to) = match (field, from, to) {
        (Some(field), Some(from), Some(to)) => (field, from, to),
        _ => {
            eprintln!("Error: --field, --from and --to are required");
            process::exit(1);
        }
    };

    let params = load_parameters(&opts);
    let points = sensitivity_sweep(&params, &field, from, to, steps).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if opts.format.as_deref() == Some("json") {
        match serde_json::to_string_pretty(&points) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing sweep: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let symbol = &params.currency_symbol;
    println!(
        "{:>14} {:>16} {:>16} {:>12}",
        field, "P&L benefit", "Net WC", "Leverage"
    );
    for point in &points {
        println!(
            "{:>14} {:>16} {:>16} {:>12}",
            format_number(point.value, 2),
            format_currency(point.metrics.total_pl_benefit, symbol),
            format_currency(point.metrics.working_capital.net_working_capital, symbol),
            format_multiple(point.metrics.ratios.leverage.adjusted),
        );
    }
}

fn cmd_defaults() {
    let record = SnapshotCodec::encode(&InputParameters::default());
    match serde_json::to_string_pretty(&Value::Object(record)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing defaults: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_generate(args: &[String]) {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut seed: Option<u64> = None;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--seed requires a number");
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(required_value(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let params = generate_random_parameters(&ParameterRanges::default(), &mut rng);
    let json = serde_json::to_string_pretty(&Value::Object(SnapshotCodec::encode(&params)))
        .unwrap_or_else(|e| {
            eprintln!("Error serializing parameters: {}", e);
            process::exit(1);
        });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated parameter set → {}", path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "compute" => cmd_compute(rest),
        "set" => cmd_set(rest),
        "sweep" => cmd_sweep(rest),
        "defaults" => cmd_defaults(),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
