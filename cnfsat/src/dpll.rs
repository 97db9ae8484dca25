//! DPLL: recursive unit propagation plus frequency-biased branching, copy-on-descent.

use cnfsat_formula::{CnfFormula, Lit};

use crate::model::Model;
use crate::state::SatState;

/// Solve a formula with the DPLL procedure.
pub fn solve(formula: &CnfFormula) -> (SatState, Option<Model>) {
    let var_count = formula.var_count();
    let clauses: Vec<Vec<Lit>> = formula.iter().map(|clause| clause.to_vec()).collect();
    let mut assignment = vec![None; var_count];

    if dpll(clauses, &mut assignment) {
        (SatState::Sat, Some(Model::from_assignment(&assignment)))
    } else {
        (SatState::Unsat, None)
    }
}

/// Run unit propagation to a fixed point, then branch on the variable with the highest
/// occurrence frequency in what remains.
fn dpll(mut clauses: Vec<Vec<Lit>>, assignment: &mut Vec<Option<bool>>) -> bool {
    if !unit_propagate(&mut clauses, assignment) {
        return false;
    }
    if clauses.is_empty() {
        return true;
    }

    let var_count = assignment.len();
    let mut pos_count = vec![0usize; var_count];
    let mut neg_count = vec![0usize; var_count];
    for clause in &clauses {
        for &lit in clause {
            if lit.is_positive() {
                pos_count[lit.index()] += 1;
            } else {
                neg_count[lit.index()] += 1;
            }
        }
    }

    let mut branch_var = None;
    let mut branch_freq = 0;
    for var in 0..var_count {
        if assignment[var].is_some() {
            continue;
        }
        let freq = pos_count[var] + neg_count[var];
        if freq > branch_freq {
            branch_freq = freq;
            branch_var = Some(var);
        }
    }

    // Every clause is non-empty and formula.var_count() covers all literals appearing in any
    // clause, so some unassigned variable must occur if clauses is non-empty.
    let var = branch_var.expect("a non-empty clause set must reference an unassigned variable");

    let try_positive_first = pos_count[var] >= neg_count[var];

    for &polarity in &[try_positive_first, !try_positive_first] {
        let mut branch_clauses = clauses.clone();
        branch_clauses.push(vec![Lit::from_index(var, polarity)]);
        let mut branch_assignment = assignment.clone();
        if dpll(branch_clauses, &mut branch_assignment) {
            *assignment = branch_assignment;
            return true;
        }
    }

    false
}

/// Repeatedly assign unit clauses and simplify until no unit clause remains or a clause becomes
/// empty (contradiction).
fn unit_propagate(clauses: &mut Vec<Vec<Lit>>, assignment: &mut [Option<bool>]) -> bool {
    loop {
        let unit = clauses.iter().find(|clause| clause.len() == 1).map(|clause| clause[0]);
        let lit = match unit {
            Some(lit) => lit,
            None => return true,
        };

        assignment[lit.index()] = Some(lit.is_positive());
        simplify(clauses, lit);

        if clauses.iter().any(|clause| clause.is_empty()) {
            return false;
        }
    }
}

/// Remove clauses satisfied by `lit` and drop `!lit` from the clauses that remain.
fn simplify(clauses: &mut Vec<Vec<Lit>>, lit: Lit) {
    clauses.retain(|clause| !clause.contains(&lit));
    for clause in clauses.iter_mut() {
        clause.retain(|&other| other != !lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnfsat_formula::{cnf_formula, test::sgen_unsat_formula};
    use proptest::prelude::*;

    #[test]
    fn single_unit_clause_is_sat() {
        let formula = cnf_formula![1;];
        let (state, model) = solve(&formula);
        assert_eq!(state, SatState::Sat);
        assert!(model.unwrap().satisfies(formula.iter()));
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let formula = cnf_formula![1; -1;];
        assert_eq!(solve(&formula).0, SatState::Unsat);
    }

    #[test]
    fn three_clause_example_is_sat() {
        let formula = cnf_formula![1, 2; -1, 3; -2, -3;];
        let (state, model) = solve(&formula);
        assert_eq!(state, SatState::Sat);
        assert!(model.unwrap().satisfies(formula.iter()));
    }

    #[test]
    fn pigeonhole_php2_is_unsat() {
        // 3 pigeons, 2 holes. Variables x_{i,j} = pigeon i in hole j, 1-indexed i*2+j+1.
        let formula = cnf_formula![
            1, 2;
            3, 4;
            5, 6;
            -1, -3;
            -1, -5;
            -3, -5;
            -2, -4;
            -2, -6;
            -4, -6;
        ];
        assert_eq!(solve(&formula).0, SatState::Unsat);
    }

    proptest! {
        #[test]
        fn sgen_unsat(formula in sgen_unsat_formula(1..7usize)) {
            prop_assert_eq!(solve(&formula).0, SatState::Unsat);
        }
    }
}
