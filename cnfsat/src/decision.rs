//! Branching heuristic.

use cnfsat_formula::{Lit, Var};

use crate::prop::{enqueue_assignment, Assignment, ImplGraph, Reason, Trail};

/// Make a branching decision and enqueue it.
///
/// Picks the lowest-index unassigned variable and assigns it positively, breaking ties by
/// variable index. Returns `false` if every variable is already assigned.
pub fn make_decision(
    assignment: &mut Assignment,
    impl_graph: &mut ImplGraph,
    trail: &mut Trail,
) -> bool {
    let index = match assignment
        .assignment()
        .iter()
        .position(|value| value.is_none())
    {
        Some(index) => index,
        None => return false,
    };

    let decision = Lit::positive(Var::from_index(index));

    trail.new_decision_level();
    enqueue_assignment(assignment, impl_graph, trail, decision, Reason::Decision);

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_lowest_index_first() {
        let mut assignment = Assignment::default();
        let mut impl_graph = ImplGraph::default();
        let mut trail = Trail::default();
        assignment.set_var_count(3);
        impl_graph.set_var_count(3);

        assert!(make_decision(&mut assignment, &mut impl_graph, &mut trail));
        assert!(assignment.lit_is_true(Lit::positive(Var::from_index(0))));

        assert!(make_decision(&mut assignment, &mut impl_graph, &mut trail));
        assert!(assignment.lit_is_true(Lit::positive(Var::from_index(1))));

        assert!(make_decision(&mut assignment, &mut impl_graph, &mut trail));
        assert!(!make_decision(&mut assignment, &mut impl_graph, &mut trail));
    }
}
