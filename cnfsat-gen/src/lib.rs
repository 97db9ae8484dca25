//! Structured and random CNF instance generators.
//!
//! These produce [`CnfFormula`] values for the two structured end-to-end scenarios named in the
//! testable-properties section (pigeonhole, triangle 3-coloring) and for fuzzing the solvers with
//! random k-CNF instances. None of this participates in the CDCL/DPLL/DP conformance surface; it
//! only needs to produce formulas the parser and engines can consume.

use cnfsat_formula::{CnfFormula, Lit};
use rand::Rng;

/// Pigeonhole principle PHP(n): `n + 1` pigeons into `n` holes. Always unsatisfiable.
///
/// Variable `x_{i,j}` ("pigeon `i` sits in hole `j`") is numbered `i * n + j` (0-based), for
/// pigeons `i` in `0..=n` and holes `j` in `0..n`.
pub fn pigeonhole(n: usize) -> CnfFormula {
    assert!(n > 0, "pigeonhole needs at least one hole");

    let pigeons = n + 1;
    let var = |i: usize, j: usize| i * n + j;

    let mut formula = CnfFormula::new();
    formula.set_var_count(pigeons * n);

    // Every pigeon sits in some hole.
    for i in 0..pigeons {
        let clause: Vec<Lit> = (0..n).map(|j| Lit::from_index(var(i, j), true)).collect();
        formula.add_clause(clause);
    }

    // No hole holds two pigeons.
    for j in 0..n {
        for i1 in 0..pigeons {
            for i2 in (i1 + 1)..pigeons {
                formula.add_clause(vec![
                    Lit::from_index(var(i1, j), false),
                    Lit::from_index(var(i2, j), false),
                ]);
            }
        }
    }

    formula
}

/// Triangle 3-coloring: 3 fully-connected nodes (`K3`), 3 colors. Always satisfiable.
///
/// Variable `c_{v,k}` ("node `v` has color `k`") is numbered `v * 3 + k` (0-based).
pub fn triangle_coloring() -> CnfFormula {
    let var = |v: usize, k: usize| v * 3 + k;

    let mut formula = CnfFormula::new();
    formula.set_var_count(9);

    for v in 0..3 {
        let at_least_one: Vec<Lit> = (0..3).map(|k| Lit::from_index(var(v, k), true)).collect();
        formula.add_clause(at_least_one);

        for k1 in 0..3 {
            for k2 in (k1 + 1)..3 {
                formula.add_clause(vec![
                    Lit::from_index(var(v, k1), false),
                    Lit::from_index(var(v, k2), false),
                ]);
            }
        }
    }

    for &(u, v) in &[(0usize, 1usize), (1, 2), (0, 2)] {
        for k in 0..3 {
            formula.add_clause(vec![
                Lit::from_index(var(u, k), false),
                Lit::from_index(var(v, k), false),
            ]);
        }
    }

    formula
}

/// Random k-CNF: `clause_count` clauses over `var_count` variables, each clause of uniformly
/// random length in `[len_min, len_max]`, containing distinct variables with uniformly random
/// polarities.
pub fn random_kcnf(
    rng: &mut impl Rng,
    var_count: usize,
    clause_count: usize,
    len_min: usize,
    len_max: usize,
) -> CnfFormula {
    assert!(len_min >= 1, "clauses need at least one literal");
    assert!(len_min <= len_max, "len_min must not exceed len_max");
    assert!(
        len_max <= var_count,
        "a clause cannot have more distinct variables than the formula has"
    );

    let mut formula = CnfFormula::new();
    formula.set_var_count(var_count);

    for _ in 0..clause_count {
        let len = if len_min == len_max {
            len_min
        } else {
            rng.gen_range(len_min, len_max + 1)
        };
        let vars = rand::seq::index::sample(rng, var_count, len);
        let clause: Vec<Lit> = vars
            .iter()
            .map(|index| Lit::from_index(index, rng.gen()))
            .collect();
        formula.add_clause(clause);
    }

    formula
}
