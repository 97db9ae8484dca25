//! DP: the original Davis-Putnam procedure, pure-literal elimination plus resolution-based
//! variable elimination. Reports a boolean verdict only; no model is produced.

use std::collections::HashSet;

use cnfsat_formula::{CnfFormula, Lit};

use crate::state::SatState;

/// Solve a formula with the DP procedure.
pub fn solve(formula: &CnfFormula) -> SatState {
    let mut clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();

    loop {
        if let Some(verdict) = terminal_verdict(&clauses) {
            return verdict;
        }

        eliminate_pure_literals(&mut clauses);

        if let Some(verdict) = terminal_verdict(&clauses) {
            return verdict;
        }

        let lit = clauses[0][0];
        if resolve_on_literal(&mut clauses, lit).is_err() {
            return SatState::Unsat;
        }
    }
}

fn terminal_verdict(clauses: &[Vec<Lit>]) -> Option<SatState> {
    if clauses.is_empty() {
        Some(SatState::Sat)
    } else if clauses.iter().any(|clause| clause.is_empty()) {
        Some(SatState::Unsat)
    } else {
        None
    }
}

/// Repeatedly drop clauses containing a literal whose negation occurs nowhere, until no such
/// literal remains.
fn eliminate_pure_literals(clauses: &mut Vec<Vec<Lit>>) {
    loop {
        let mut occurring = HashSet::new();
        for clause in clauses.iter() {
            occurring.extend(clause.iter().copied());
        }

        let pure = occurring.iter().find(|&&lit| !occurring.contains(&!lit)).copied();
        match pure {
            Some(lit) => clauses.retain(|clause| !clause.contains(&lit)),
            None => return,
        }
    }
}

/// Eliminate `lit`'s variable: replace every clause mentioning it or its negation with the set of
/// non-tautological resolvents across the two groups. Returns `Err` if the empty clause is
/// resolved, meaning the formula is unsatisfiable.
fn resolve_on_literal(clauses: &mut Vec<Vec<Lit>>, lit: Lit) -> Result<(), ()> {
    let neg = !lit;
    let mut with_lit = Vec::new();
    let mut with_neg = Vec::new();
    let mut rest = Vec::new();

    for clause in clauses.drain(..) {
        if clause.contains(&lit) {
            with_lit.push(clause);
        } else if clause.contains(&neg) {
            with_neg.push(clause);
        } else {
            rest.push(clause);
        }
    }

    for pos_clause in &with_lit {
        for neg_clause in &with_neg {
            let mut resolvent: Vec<Lit> = pos_clause
                .iter()
                .chain(neg_clause.iter())
                .copied()
                .filter(|&l| l != lit && l != neg)
                .collect();
            resolvent.sort_unstable();
            resolvent.dedup();

            if resolvent.iter().any(|&l| resolvent.contains(&!l)) {
                continue;
            }
            if resolvent.is_empty() {
                return Err(());
            }
            rest.push(resolvent);
        }
    }

    *clauses = rest;
    Ok(())
}
