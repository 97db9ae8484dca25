//! Boolean constraint propagation (BCP) via two-watched-literals.

use super::assignment::{enqueue_assignment, Assignment, Conflict, ImplGraph, Reason, Trail};
use super::watch::{Watch, Watchlists};
use crate::clause::ClauseArena;

/// Drain the propagation queue, running unit propagation to a fixed point.
///
/// Processes literals in FIFO order. For each newly-true literal, every clause watching its
/// negation is inspected: clauses already satisfied through their blocking literal are skipped,
/// clauses with another non-false literal move their watch there, and clauses with no such
/// replacement either become unit (propagating their other watched literal) or are reported as a
/// conflict.
pub fn propagate(
    assignment: &mut Assignment,
    impl_graph: &mut ImplGraph,
    trail: &mut Trail,
    watchlists: &mut Watchlists,
    clauses: &mut ClauseArena,
) -> Result<(), Conflict> {
    while let Some(lit) = trail.pop_queue() {
        let false_lit = !lit;

        let watches = watchlists.take(lit);
        let mut kept = Vec::with_capacity(watches.len());
        let mut conflict = None;

        let mut iter = watches.into_iter();
        while let Some(watch) = iter.next() {
            if assignment.lit_is_true(watch.blocking) {
                kept.push(watch);
                continue;
            }

            let cref = watch.cref;
            let lits = clauses.lits_mut(cref);

            if lits[0] == false_lit {
                lits.swap(0, 1);
            }
            debug_assert_eq!(lits[1], false_lit);

            let other = lits[0];
            let new_watch = Watch {
                cref,
                blocking: other,
            };

            if other != watch.blocking && assignment.lit_is_true(other) {
                kept.push(new_watch);
                continue;
            }

            let mut replacement = None;
            for i in 2..lits.len() {
                if !assignment.lit_is_false(lits[i]) {
                    replacement = Some(i);
                    break;
                }
            }

            if let Some(i) = replacement {
                lits.swap(1, i);
                let new_watched = lits[1];
                if !new_watched == false_lit {
                    // Tautological clause watching a complementary pair: the new watch belongs
                    // right back in the list we're draining.
                    kept.push(new_watch);
                } else {
                    watchlists.add_watch(!new_watched, new_watch);
                }
                continue;
            }

            kept.push(new_watch);

            if assignment.lit_is_false(other) {
                kept.extend(iter);
                conflict = Some(Conflict { cref });
                break;
            }

            enqueue_assignment(assignment, impl_graph, trail, other, Reason::Clause(cref));
        }

        watchlists.set(lit, kept);

        if let Some(conflict) = conflict {
            return Err(conflict);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnfsat_formula::lit;

    fn setup(var_count: usize) -> (Assignment, ImplGraph, Trail, Watchlists, ClauseArena) {
        let mut assignment = Assignment::default();
        let mut impl_graph = ImplGraph::default();
        let trail = Trail::default();
        let mut watchlists = Watchlists::default();
        assignment.set_var_count(var_count);
        impl_graph.set_var_count(var_count);
        watchlists.set_var_count(var_count);
        (assignment, impl_graph, trail, watchlists, ClauseArena::default())
    }

    #[test]
    fn unit_propagation_chains() {
        let (mut assignment, mut impl_graph, mut trail, mut watchlists, mut clauses) = setup(3);

        // (1 -> 2), (-2 -> 3): a 1 2, -2 3 implication chain.
        let c1 = clauses.add_clause(vec![lit![-1], lit![2]]);
        watchlists.watch_clause(c1, [lit![-1], lit![2]]);
        let c2 = clauses.add_clause(vec![lit![-2], lit![3]]);
        watchlists.watch_clause(c2, [lit![-2], lit![3]]);

        enqueue_assignment(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            lit![1],
            Reason::Decision,
        );

        let result = propagate(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            &mut watchlists,
            &mut clauses,
        );

        assert!(result.is_ok());
        assert!(assignment.lit_is_true(lit![2]));
        assert!(assignment.lit_is_true(lit![3]));
    }

    #[test]
    fn detects_conflict() {
        let (mut assignment, mut impl_graph, mut trail, mut watchlists, mut clauses) = setup(2);

        let c1 = clauses.add_clause(vec![lit![-1], lit![2]]);
        watchlists.watch_clause(c1, [lit![-1], lit![2]]);
        let c2 = clauses.add_clause(vec![lit![-1], lit![-2]]);
        watchlists.watch_clause(c2, [lit![-1], lit![-2]]);

        enqueue_assignment(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            lit![1],
            Reason::Decision,
        );
        trail.new_decision_level();
        enqueue_assignment(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            lit![2],
            Reason::Decision,
        );

        let result = propagate(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            &mut watchlists,
            &mut clauses,
        );

        match result {
            Err(Conflict { cref }) => assert_eq!(cref, c2),
            Ok(()) => panic!("expected a conflict"),
        }
    }
}
