use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{App, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info, Level, LevelFilter, Record};

use cnfsat::{cdcl, dp, dpll, Model, SatState};
use cnfsat_formula::CnfFormula;

mod driver;

use driver::{discover_instances, read_instance, Engine};

fn main() {
    init_logging();

    let matches = App::new("cnfsat")
        .version(env!("CNFSAT_VERSION"))
        .about("Runs the cnfsat CDCL/DPLL/DP engines over every CNF instance in a directory")
        .arg_from_usage("[DIR] 'Directory to search for instances (default: current directory)'")
        .arg(
            Arg::from_usage("-e, --engine=[ENGINE] 'Solving engine to use'")
                .possible_values(&["cdcl", "dpll", "dp"])
                .default_value("cdcl"),
        )
        .get_matches();

    let dir = matches
        .value_of("DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::current_dir().expect("cannot read the current directory"));

    let engine = match matches.value_of("engine").unwrap() {
        "cdcl" => Engine::Cdcl,
        "dpll" => Engine::Dpll,
        "dp" => Engine::Dp,
        _ => unreachable!("clap restricts --engine to a known set of values"),
    };

    let files = match discover_instances(&dir) {
        Ok(files) => files,
        Err(err) => {
            error!("{}", err);
            std::process::exit(0);
        }
    };

    info!("found {} instance(s) in {}", files.len(), dir.display());

    for path in files {
        let filename = path.file_name().unwrap().to_string_lossy().into_owned();
        println!("Processing {}...", filename);

        let start = Instant::now();
        match read_instance(&path) {
            Ok(formula) => report(engine, &formula),
            Err(err) => println!("Error processing {}: {}", filename, err),
        }
        println!("Time taken: {} seconds", start.elapsed().as_secs_f64());
    }

    std::process::exit(0);
}

/// Solve one formula with the selected engine and print the verdict.
fn report(engine: Engine, formula: &CnfFormula) {
    info!(
        "parsed formula with {} variable(s) and {} clause(s)",
        formula.var_count(),
        formula.len()
    );

    match engine {
        Engine::Cdcl => {
            let (state, model) = cdcl::solve(formula);
            print_verdict(state, model.as_ref());
        }
        Engine::Dpll => {
            let (state, model) = dpll::solve(formula);
            print_verdict(state, model.as_ref());
        }
        Engine::Dp => {
            print_verdict(dp::solve(formula), None);
        }
    }
}

fn print_verdict(state: SatState, model: Option<&Model>) {
    match state {
        SatState::Sat => {
            println!("SAT");
            if let Some(model) = model {
                let line = model
                    .lits()
                    .iter()
                    .map(|lit| lit.to_dimacs().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{} 0", line);
            }
        }
        SatState::Unsat => println!("UNSAT"),
        SatState::Unknown => unreachable!("solve() always returns a terminal state"),
    }

    info!("solve finished with verdict {:?}", state);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(format)
        .filter(None, LevelFilter::Warn);

    if let Ok(ref env_var) = env::var("RUST_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}
