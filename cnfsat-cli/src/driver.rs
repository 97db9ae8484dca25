//! Directory walking and per-file error handling for the CLI driver.
//!
//! Mirrors the comparison harness this solver was built alongside: point the driver at a
//! directory, it finds every recognized CNF instance in it and solves each one in turn, catching
//! and reporting per-file errors without aborting the rest of the run.

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions recognized as CNF instances by the directory walker.
const INSTANCE_SUFFIXES: &[&str] = &[".cnf.txt", ".cnf", ".txt"];

/// Error encountered while processing a single input file.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(anyhow::Error),
}

/// Which solving engine to run a file through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Engine {
    Cdcl,
    Dpll,
    Dp,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Engine::Cdcl => "cdcl",
            Engine::Dpll => "dpll",
            Engine::Dp => "dp",
        };
        f.write_str(name)
    }
}

/// Collect every file in `dir` whose name matches the input-extension policy, sorted by name so
/// that a directory's processing order is reproducible.
pub fn discover_instances(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if INSTANCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Open and fully parse a DIMACS CNF file, wrapping I/O and parse failures alike.
pub fn read_instance(path: &Path) -> Result<cnfsat_formula::CnfFormula, DriverError> {
    let file = File::open(path)?;
    cnfsat_dimacs::parse_dimacs(file).map_err(DriverError::Parse)
}
