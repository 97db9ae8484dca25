//! The partial assignment and the trail.

use cnfsat_formula::{Lit, Var};

use crate::clause::ClauseRef;

/// Either a clause that forced a literal's assignment, or a branching decision.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    Decision,
    Clause(ClauseRef),
}

/// The clause whose watched literals were both found false, i.e. a conflict.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Conflict {
    pub cref: ClauseRef,
}

/// The current partial assignment.
#[derive(Default)]
pub struct Assignment {
    assignment: Vec<Option<bool>>,
}

impl Assignment {
    /// Resize the assignment for a given variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.assignment.resize(count, None);
    }

    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.assignment[var.index()]
    }

    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.index()].map(|value| value ^ lit.is_negative())
    }

    pub fn lit_is_true(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(true)
    }

    pub fn lit_is_false(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(false)
    }

    pub fn lit_is_unassigned(&self, lit: Lit) -> bool {
        self.assignment[lit.index()].is_none()
    }

    fn assign_lit(&mut self, lit: Lit) {
        self.assignment[lit.index()] = Some(lit.is_positive());
    }

    fn unassign_var(&mut self, var: Var) {
        self.assignment[var.index()] = None;
    }

    /// The full assignment, one entry per variable, in variable order.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }
}

/// Node of the implication graph for one assigned variable: why it was assigned and at what
/// decision level.
#[derive(Copy, Clone)]
struct ImplNode {
    reason: Reason,
    level: usize,
}

/// The implication graph: for every currently assigned variable, its reason and decision level.
#[derive(Default)]
pub struct ImplGraph {
    nodes: Vec<ImplNode>,
}

impl ImplGraph {
    pub fn set_var_count(&mut self, count: usize) {
        self.nodes.resize(
            count,
            ImplNode {
                reason: Reason::Decision,
                level: 0,
            },
        );
    }

    /// Reason for an assigned variable. Stale if the variable isn't currently assigned.
    pub fn reason(&self, var: Var) -> Reason {
        self.nodes[var.index()].reason
    }

    /// Decision level of an assigned variable. Stale if the variable isn't currently assigned.
    pub fn level(&self, var: Var) -> usize {
        self.nodes[var.index()].level
    }
}

/// Assignment history, used for backtracking and to drive BCP.
#[derive(Default)]
pub struct Trail {
    trail: Vec<Lit>,
    queue_head: usize,
    decisions: Vec<usize>,
}

impl Trail {
    /// Current decision level (0 before any decision has been made).
    pub fn current_level(&self) -> usize {
        self.decisions.len()
    }

    /// All literals assigned so far, in assignment order.
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// Pop the next not-yet-propagated literal off the queue.
    pub fn pop_queue(&mut self) -> Option<Lit> {
        let lit = self.trail.get(self.queue_head).copied();
        if lit.is_some() {
            self.queue_head += 1;
        }
        lit
    }

    /// Start a new decision level. Does not enqueue the decision literal itself.
    pub fn new_decision_level(&mut self) {
        self.decisions.push(self.trail.len());
    }
}

/// Enqueue the assignment of a literal to true.
///
/// The literal must currently be unassigned.
pub fn enqueue_assignment(
    assignment: &mut Assignment,
    impl_graph: &mut ImplGraph,
    trail: &mut Trail,
    lit: Lit,
    reason: Reason,
) {
    debug_assert!(assignment.lit_value(lit).is_none());

    assignment.assign_lit(lit);

    let node = &mut impl_graph.nodes[lit.index()];
    node.reason = reason;
    node.level = trail.decisions.len();

    trail.trail.push(lit);
}

/// Undo all assignments made at a decision level deeper than `level`.
///
/// Watch lists never need to be touched here: unassigning a variable only turns a false literal
/// back into an unassigned one, which cannot violate the watched-literal invariant.
pub fn backtrack(assignment: &mut Assignment, trail: &mut Trail, level: usize) {
    if level >= trail.decisions.len() {
        return;
    }

    let new_trail_len = trail.decisions[level];
    trail.decisions.truncate(level);
    trail.queue_head = trail.queue_head.min(new_trail_len);

    for &lit in &trail.trail[new_trail_len..] {
        assignment.unassign_var(lit.var());
    }
    trail.trail.truncate(new_trail_len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnfsat_formula::lit;

    #[test]
    fn assign_and_backtrack() {
        let mut assignment = Assignment::default();
        let mut impl_graph = ImplGraph::default();
        let mut trail = Trail::default();
        assignment.set_var_count(3);
        impl_graph.set_var_count(3);

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
            lit![-2],
            Reason::Decision,
        );

        assert!(assignment.lit_is_true(lit![1]));
        assert!(assignment.lit_is_false(lit![2]));
        assert_eq!(trail.current_level(), 1);

        backtrack(&mut assignment, &mut trail, 0);

        assert!(assignment.lit_is_unassigned(lit![2]));
        assert!(assignment.lit_is_true(lit![1]));
        assert_eq!(trail.current_level(), 0);
    }
}
