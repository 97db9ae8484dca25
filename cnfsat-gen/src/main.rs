use std::io;

use clap::{App, AppSettings, Arg, SubCommand};

use cnfsat_dimacs::write_dimacs;
use cnfsat_formula::CnfFormula;
use cnfsat_gen::{pigeonhole, random_kcnf, triangle_coloring};

fn main() {
    let matches = App::new("cnfsat-gen")
        .about("Generates DIMACS CNF instances for the cnfsat solvers")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("php")
                .about("Pigeonhole PHP(n): n+1 pigeons into n holes (always unsatisfiable)")
                .arg(Arg::with_name("N").required(true).validator(is_usize)),
        )
        .subcommand(
            SubCommand::with_name("coloring")
                .about("Triangle 3-coloring on K3 with 3 colors (always satisfiable)"),
        )
        .subcommand(
            SubCommand::with_name("random")
                .about("Random k-CNF with uniformly random clause lengths in [KMIN, KMAX]")
                .arg(Arg::with_name("V").required(true).validator(is_usize))
                .arg(Arg::with_name("C").required(true).validator(is_usize))
                .arg(Arg::with_name("KMIN").required(true).validator(is_usize))
                .arg(Arg::with_name("KMAX").required(true).validator(is_usize)),
        )
        .get_matches();

    let formula: CnfFormula = match matches.subcommand() {
        ("php", Some(sub)) => pigeonhole(parse_arg(sub, "N")),
        ("coloring", Some(_)) => triangle_coloring(),
        ("random", Some(sub)) => {
            let mut rng = rand::thread_rng();
            random_kcnf(
                &mut rng,
                parse_arg(sub, "V"),
                parse_arg(sub, "C"),
                parse_arg(sub, "KMIN"),
                parse_arg(sub, "KMAX"),
            )
        }
        _ => unreachable!("SubcommandRequiredElseHelp guarantees a subcommand was given"),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_dimacs(&mut handle, &formula).expect("failed to write DIMACS output");
}

fn parse_arg(matches: &clap::ArgMatches, name: &str) -> usize {
    matches
        .value_of(name)
        .unwrap()
        .parse()
        .expect("validator already checked this is a usize")
}

fn is_usize(value: String) -> Result<(), String> {
    value
        .parse::<usize>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a non-negative integer", value))
}
