//! Conflict analysis: derives a 1-UIP learned clause and a backjump level.

use cnfsat_formula::Lit;

use crate::clause::ClauseArena;
use crate::prop::{Assignment, Conflict, ImplGraph, Reason, Trail};

/// Result of analyzing a conflict.
pub struct Analysis {
    /// The learned clause. Position 0 is the asserting literal (the negated UIP); position 1
    /// (if present) is the literal with the highest level among the rest, making it the second
    /// watch.
    pub clause: Vec<Lit>,
    /// The level to backtrack to before asserting `clause[0]`.
    pub backjump_level: usize,
}

/// Walk the trail backwards from the conflict to find the first unique implication point.
///
/// Maintains a `seen` flag per variable and a `pending` count of not-yet-resolved literals at
/// the current decision level. Starting from the conflicting clause's literals, the trail is
/// walked tail-first; whenever a `seen` literal is reached its reason is resolved in, until
/// `pending` drops to zero — at that point the literal being processed is the UIP.
pub fn analyze_conflict(
    assignment: &Assignment,
    impl_graph: &ImplGraph,
    trail: &Trail,
    clauses: &ClauseArena,
    conflict: Conflict,
) -> Analysis {
    let current_level = trail.current_level();

    let mut seen = vec![false; assignment.assignment().len()];
    let mut pending = 0usize;
    let mut clause = Vec::new();

    for &lit in clauses.lits(conflict.cref) {
        add_literal(impl_graph, current_level, &mut seen, &mut clause, &mut pending, lit);
    }

    if current_level == 0 {
        // Every literal of the conflict is implied at level 0: the empty clause is learned.
        return Analysis {
            clause: Vec::new(),
            backjump_level: 0,
        };
    }

    let mut uip = None;

    for &lit in trail.trail().iter().rev() {
        let var = lit.var();
        if !seen[var.index()] {
            continue;
        }
        seen[var.index()] = false;
        pending -= 1;
        if pending == 0 {
            uip = Some(lit);
            break;
        }

        match impl_graph.reason(var) {
            Reason::Decision => unreachable!("a current-level literal with pending > 0 must have a propagating reason"),
            Reason::Clause(cref) => {
                for &reason_lit in &clauses.lits(cref)[1..] {
                    add_literal(impl_graph, current_level, &mut seen, &mut clause, &mut pending, reason_lit);
                }
            }
        }
    }

    let uip = uip.expect("1-UIP search must terminate before exhausting the trail");

    clause.insert(0, !uip);

    let mut backjump_level = 0;
    if clause.len() > 1 {
        let mut highest = 1;
        let mut highest_level = impl_graph.level(clause[1].var());
        for i in 2..clause.len() {
            let level = impl_graph.level(clause[i].var());
            if level > highest_level {
                highest_level = level;
                highest = i;
            }
        }
        clause.swap(1, highest);
        backjump_level = highest_level;
    }

    Analysis {
        clause,
        backjump_level,
    }
}

/// Fold one literal into the working clause: level-0 literals are already implied by the input
/// and dropped, current-level literals bump `pending` instead of being added directly (they'll be
/// resolved away or become the UIP), and the rest join the clause-in-progress.
fn add_literal(
    impl_graph: &ImplGraph,
    current_level: usize,
    seen: &mut [bool],
    clause: &mut Vec<Lit>,
    pending: &mut usize,
    lit: Lit,
) {
    let level = impl_graph.level(lit.var());
    if level == 0 || seen[lit.index()] {
        return;
    }
    seen[lit.index()] = true;
    if level == current_level {
        *pending += 1;
    } else {
        clause.push(lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnfsat_formula::lit;
    use crate::prop::enqueue_assignment;

    #[test]
    fn unit_clause_learned_from_simple_conflict() {
        let mut assignment = Assignment::default();
        let mut impl_graph = ImplGraph::default();
        let mut trail = Trail::default();
        let mut clauses = ClauseArena::default();

        assignment.set_var_count(2);
        impl_graph.set_var_count(2);

        // Decide 1, propagate -2 via (-1 -2), conflict via (-1 2).
        trail.new_decision_level();
        enqueue_assignment(&mut assignment, &mut impl_graph, &mut trail, lit![1], Reason::Decision);

        let c1 = clauses.add_clause(vec![lit![-1], lit![-2]]);
        enqueue_assignment(
            &mut assignment,
            &mut impl_graph,
            &mut trail,
            lit![-2],
            Reason::Clause(c1),
        );

        let c2 = clauses.add_clause(vec![lit![-1], lit![2]]);

        let analysis = analyze_conflict(
            &assignment,
            &impl_graph,
            &trail,
            &clauses,
            Conflict { cref: c2 },
        );

        assert_eq!(analysis.clause, vec![lit![-1]]);
        assert_eq!(analysis.backjump_level, 0);
    }
}
