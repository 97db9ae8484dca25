//! The structured end-to-end scenarios: generated pigeonhole instances must be UNSAT, the
//! generated triangle-coloring instance must be SAT with a proper coloring, and all three
//! solving engines must agree.

use cnfsat::{cdcl, dp, dpll, SatState};
use cnfsat_gen::{pigeonhole, triangle_coloring};

#[test]
fn php2_is_unsat_on_every_engine() {
    let formula = pigeonhole(2);
    assert_eq!(formula.var_count(), 6);
    assert_eq!(cdcl::solve(&formula).0, SatState::Unsat);
    assert_eq!(dpll::solve(&formula).0, SatState::Unsat);
    assert_eq!(dp::solve(&formula), SatState::Unsat);
}

#[test]
fn php3_is_unsat_on_every_engine() {
    let formula = pigeonhole(3);
    assert_eq!(formula.var_count(), 12);
    assert_eq!(cdcl::solve(&formula).0, SatState::Unsat);
    assert_eq!(dpll::solve(&formula).0, SatState::Unsat);
    assert_eq!(dp::solve(&formula), SatState::Unsat);
}

#[test]
fn triangle_coloring_is_sat_with_distinct_colors() {
    let formula = triangle_coloring();
    let (state, model) = cdcl::solve(&formula);
    assert_eq!(state, SatState::Sat);

    let model = model.unwrap();
    assert!(model.satisfies(formula.iter()));

    // Each node (variables v*3 .. v*3+3) must have exactly one color, and no two nodes share one.
    let mut colors = Vec::new();
    for v in 0..3 {
        let color = (0..3)
            .find(|&k| model.lits()[v * 3 + k].is_positive())
            .expect("every node has at least one color in a satisfying model");
        colors.push(color);
    }
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), 3, "all three nodes must use distinct colors");
}
