//! The CDCL solver: ties together propagation, conflict analysis and branching into the state
//! machine described by the engine's main loop (propagating / branching / analyzing / terminal).

use cnfsat_formula::{CnfFormula, Lit};
use log::info;

use crate::analyze_conflict::analyze_conflict;
use crate::clause::ClauseArena;
use crate::decision::make_decision;
use crate::model::Model;
use crate::prop::{backtrack, enqueue_assignment, propagate, Assignment, ImplGraph, Reason, Trail, Watchlists};
use crate::state::SatState;

/// A CDCL (Conflict-Driven Clause Learning) SAT solver.
///
/// Clauses are added with [`CdclSolver::add_formula`] or [`CdclSolver::add_clause`], then
/// [`CdclSolver::solve`] runs to a verdict. A solve is single-shot: there is no support for adding
/// clauses, assuming literals, or resuming search after a verdict has been reached.
#[derive(Default)]
pub struct CdclSolver {
    var_count: usize,
    assignment: Assignment,
    impl_graph: ImplGraph,
    trail: Trail,
    watchlists: Watchlists,
    clauses: ClauseArena,
    state: SatState,
}

impl CdclSolver {
    pub fn new() -> CdclSolver {
        CdclSolver::default()
    }

    /// Reserve storage for `count` variables. Must be called before adding any clause that
    /// references a variable past the current count.
    pub fn set_var_count(&mut self, count: usize) {
        if count <= self.var_count {
            return;
        }
        self.var_count = count;
        self.assignment.set_var_count(count);
        self.impl_graph.set_var_count(count);
        self.watchlists.set_var_count(count);
    }

    /// Add every clause of a formula.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        self.set_var_count(formula.var_count());
        for clause in formula.iter() {
            self.add_clause(clause);
        }
    }

    /// Add a single clause.
    ///
    /// Per the initialization rules: an empty clause is an immediate contradiction, a unit clause
    /// is assigned at decision level 0 (or detected as contradictory if it conflicts with an
    /// existing level-0 assignment), and longer clauses register watches on their first two
    /// literals without otherwise being simplified (duplicate literals and tautologies are left
    /// as-is; they never cause incorrect behavior, only wasted work).
    pub fn add_clause(&mut self, lits: &[Lit]) {
        if self.state == SatState::Unsat {
            return;
        }

        match lits.len() {
            0 => self.state = SatState::Unsat,
            1 => {
                let lit = lits[0];
                match self.assignment.lit_value(lit) {
                    Some(true) => {}
                    Some(false) => self.state = SatState::Unsat,
                    None => {
                        let cref = self.clauses.add_clause(lits.to_vec());
                        enqueue_assignment(
                            &mut self.assignment,
                            &mut self.impl_graph,
                            &mut self.trail,
                            lit,
                            Reason::Clause(cref),
                        );
                    }
                }
            }
            _ => {
                let cref = self.clauses.add_clause(lits.to_vec());
                self.watchlists.watch_clause(cref, [lits[0], lits[1]]);
            }
        }
    }

    /// Run the solver to a verdict.
    pub fn solve(&mut self) -> SatState {
        while self.state == SatState::Unknown {
            self.step();
        }
        info!("cdcl solve finished with verdict {:?}", self.state);
        self.state
    }

    /// The satisfying model, once `solve` has returned [`SatState::Sat`].
    pub fn model(&self) -> Option<Model> {
        if self.state == SatState::Sat {
            Some(Model::from_assignment(self.assignment.assignment()))
        } else {
            None
        }
    }

    /// One iteration of the propagate / branch / analyze state machine.
    fn step(&mut self) {
        match propagate(
            &mut self.assignment,
            &mut self.impl_graph,
            &mut self.trail,
            &mut self.watchlists,
            &mut self.clauses,
        ) {
            Ok(()) => {
                if !make_decision(&mut self.assignment, &mut self.impl_graph, &mut self.trail) {
                    self.state = SatState::Sat;
                }
            }
            Err(conflict) => {
                if self.trail.current_level() == 0 {
                    self.state = SatState::Unsat;
                    return;
                }

                let analysis = analyze_conflict(
                    &self.assignment,
                    &self.impl_graph,
                    &self.trail,
                    &self.clauses,
                    conflict,
                );

                backtrack(&mut self.assignment, &mut self.trail, analysis.backjump_level);

                if analysis.clause.is_empty() {
                    self.state = SatState::Unsat;
                    return;
                }

                let asserting = analysis.clause[0];
                let second_watch = if analysis.clause.len() > 1 {
                    Some(analysis.clause[1])
                } else {
                    None
                };
                let cref = self.clauses.add_clause(analysis.clause);
                if let Some(second_watch) = second_watch {
                    self.watchlists.watch_clause(cref, [asserting, second_watch]);
                }
                let reason = Reason::Clause(cref);

                enqueue_assignment(
                    &mut self.assignment,
                    &mut self.impl_graph,
                    &mut self.trail,
                    asserting,
                    reason,
                );
            }
        }
    }
}

/// Convenience entry point: solve a formula from scratch.
pub fn solve(formula: &CnfFormula) -> (SatState, Option<Model>) {
    let mut solver = CdclSolver::new();
    solver.add_formula(formula);
    let state = solver.solve();
    let model = solver.model();
    (state, model)
}
