//! DIMACS CNF parser and writer.
//!
//! Parses the line-oriented DIMACS CNF format: `c` lines and blank lines are ignored, a `p cnf
//! V C` header declares the variable and clause counts and must appear before any literal, and
//! clauses are whitespace-separated signed integers terminated by a literal `0`. Clauses may
//! span multiple lines.
use std::io::{self, BufRead};

use anyhow::Error;
use thiserror::Error;

use cnfsat_formula::{CnfFormula, Lit};

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: literal before 'p cnf' header")]
    LiteralBeforeHeader { line: usize },

    #[error("line {line}: invalid header syntax: {header}")]
    InvalidHeader { line: usize, header: String },

    #[error("line {line}: duplicate 'p cnf' header")]
    DuplicateHeader { line: usize },

    #[error("line {line}: not an integer: '{token}'")]
    NotAnInteger { line: usize, token: String },

    #[error("line {line}: variable {var} exceeds the declared variable count {var_count}")]
    VarOutOfRange {
        line: usize,
        var: isize,
        var_count: usize,
    },

    #[error("unterminated clause at end of input")]
    UnterminatedClause,

    #[error("formula has {clause_count} clauses while the header declares {header_clause_count}")]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
}

/// Variable and clause count declared by a DIMACS CNF header.
#[derive(Copy, Clone, Debug)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Parse a complete DIMACS CNF document.
///
/// Checks the header counts against what was actually parsed once the whole input has been
/// consumed.
pub fn parse_dimacs(input: impl io::Read) -> Result<CnfFormula, Error> {
    let mut formula = CnfFormula::new();
    let mut header: Option<DimacsHeader> = None;
    let mut clause = Vec::new();
    let mut clause_count = 0;

    let buffer = io::BufReader::new(input);

    for (line_index, line) in buffer.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        if line.starts_with('p') {
            if header.is_some() {
                return Err(ParserError::DuplicateHeader { line: line_number }.into());
            }
            let parsed = parse_header(line_number, line)?;
            formula.set_var_count(parsed.var_count);
            header = Some(parsed);
            continue;
        }

        if header.is_none() {
            return Err(ParserError::LiteralBeforeHeader { line: line_number }.into());
        }
        let var_count = header.unwrap().var_count;

        for token in line.split_whitespace() {
            let number: isize = token.parse().map_err(|_| ParserError::NotAnInteger {
                line: line_number,
                token: token.to_owned(),
            })?;

            if number == 0 {
                formula.add_clause(clause.drain(..));
                clause_count += 1;
                continue;
            }

            if number.unsigned_abs() > var_count {
                return Err(ParserError::VarOutOfRange {
                    line: line_number,
                    var: number,
                    var_count,
                }
                .into());
            }

            clause.push(Lit::from_dimacs(number));
        }
    }

    if !clause.is_empty() {
        return Err(ParserError::UnterminatedClause.into());
    }

    if let Some(header) = header {
        if clause_count != header.clause_count {
            return Err(ParserError::ClauseCount {
                clause_count,
                header_clause_count: header.clause_count,
            }
            .into());
        }
    }

    Ok(formula)
}

fn parse_header(line_number: usize, line: &str) -> Result<DimacsHeader, ParserError> {
    let invalid = || ParserError::InvalidHeader {
        line: line_number,
        header: line.to_owned(),
    };

    let mut tokens = line.split_whitespace();

    if tokens.next() != Some("p") {
        return Err(invalid());
    }
    if tokens.next() != Some("cnf") {
        return Err(invalid());
    }

    let var_count: usize = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(invalid)?;
    let clause_count: usize = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(invalid)?;

    if tokens.next().is_some() {
        return Err(invalid());
    }

    Ok(DimacsHeader {
        var_count,
        clause_count,
    })
}

/// Write a DIMACS CNF header.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    writeln!(
        target,
        "p cnf {var_count} {clause_count}",
        var_count = header.var_count,
        clause_count = header.clause_count,
    )
}

/// Write an iterator of clauses as headerless DIMACS CNF.
pub fn write_dimacs_clauses<'a>(
    target: &mut impl io::Write,
    clauses: impl IntoIterator<Item = &'a [Lit]>,
) -> io::Result<()> {
    for clause in clauses {
        for lit in clause {
            itoa::write(&mut *target, lit.to_dimacs())?;
            target.write_all(b" ")?;
        }
        target.write_all(b"0\n")?;
    }
    Ok(())
}

/// Write a formula as DIMACS CNF, header and clauses together.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    write_dimacs_header(
        &mut *target,
        DimacsHeader {
            var_count: formula.var_count(),
            clause_count: formula.len(),
        },
    )?;
    write_dimacs_clauses(&mut *target, formula.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_formula() {
        let input = b"c a comment\np cnf 3 2\n1 2 0\n-1 3 0\n" as &[u8];
        let formula = parse_dimacs(input).unwrap();
        assert_eq!(formula.var_count(), 3);
        assert_eq!(formula.len(), 2);
        let clauses: Vec<Vec<isize>> = formula
            .iter()
            .map(|clause| clause.iter().map(|l| l.to_dimacs()).collect())
            .collect();
        assert_eq!(clauses, vec![vec![1, 2], vec![-1, 3]]);
    }

    #[test]
    fn clauses_span_multiple_lines() {
        let input = b"p cnf 4 1\n1 -2\n3 4 0\n" as &[u8];
        let formula = parse_dimacs(input).unwrap();
        assert_eq!(formula.len(), 1);
        assert_eq!(formula.iter().next().unwrap().len(), 4);
    }

    #[test]
    fn rejects_literal_before_header() {
        let input = b"1 2 0\np cnf 2 1\n" as &[u8];
        let err = parse_dimacs(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParserError>(),
            Some(ParserError::LiteralBeforeHeader { .. })
        ));
    }

    #[test]
    fn rejects_malformed_header() {
        let input = b"p cnf 2\n1 2 0\n" as &[u8];
        let err = parse_dimacs(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParserError>(),
            Some(ParserError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_literal() {
        let input = b"p cnf 2 1\n1 3 0\n" as &[u8];
        let err = parse_dimacs(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParserError>(),
            Some(ParserError::VarOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_unterminated_clause() {
        let input = b"p cnf 2 1\n1 2\n" as &[u8];
        let err = parse_dimacs(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParserError>(),
            Some(ParserError::UnterminatedClause)
        ));
    }

    #[test]
    fn roundtrip_via_writer() {
        let input = b"p cnf 3 2\n1 2 0\n-1 3 -2 0\n" as &[u8];
        let formula = parse_dimacs(input).unwrap();

        let mut buf = Vec::new();
        write_dimacs(&mut buf, &formula).unwrap();

        let reparsed = parse_dimacs(&buf[..]).unwrap();
        assert_eq!(formula, reparsed);
    }
}
