//! Watch lists used to detect clauses that became unit or falsified.
//!
//! Every clause with at least two literals is watched through exactly two of its literals. A
//! watch entry also carries a *blocking literal* — some other literal of the same clause — so
//! that a clause already satisfied through that literal can be skipped without touching the
//! clause arena at all.

use cnfsat_formula::Lit;

use crate::clause::ClauseRef;

/// A watch on a clause, stored in the watch list of one of its literals.
#[derive(Copy, Clone)]
pub struct Watch {
    /// The clause being watched.
    pub cref: ClauseRef,
    /// A literal of the clause other than the one whose watch list this lives in.
    pub blocking: Lit,
}

/// Per-literal watch lists.
#[derive(Default)]
pub struct Watchlists {
    watches: Vec<Vec<Watch>>,
}

impl Watchlists {
    /// Resize the watch lists for a given variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.watches.resize(count * 2, vec![]);
    }

    /// Start watching a clause through its first two literals.
    pub fn watch_clause(&mut self, cref: ClauseRef, lits: [Lit; 2]) {
        for i in 0..2 {
            let watch = Watch {
                cref,
                blocking: lits[i ^ 1],
            };
            self.watches[(!lits[i]).code()].push(watch);
        }
    }

    /// Take ownership of a literal's watch list, leaving an empty one in its place.
    ///
    /// Used by propagation to scan a watch list while being free to add new watches to the same
    /// list (a tautological clause can end up re-watching the literal it is currently being
    /// scanned for).
    pub fn take(&mut self, lit: Lit) -> Vec<Watch> {
        std::mem::take(&mut self.watches[lit.code()])
    }

    /// Replace a literal's watch list, e.g. after scanning it during propagation.
    pub fn set(&mut self, lit: Lit, watches: Vec<Watch>) {
        self.watches[lit.code()] = watches;
    }

    /// Add a single watch to a literal's watch list.
    pub fn add_watch(&mut self, lit: Lit, watch: Watch) {
        self.watches[lit.code()].push(watch);
    }
}
