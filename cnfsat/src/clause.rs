//! The clause arena.
//!
//! Original and learned clauses live in the same append-only store. A [`ClauseRef`] is simply an
//! index into it, not a pointer, so the arena can grow during conflict analysis without
//! invalidating references kept in watch lists or the implication graph.

use cnfsat_formula::Lit;

/// A reference to a clause stored in a [`ClauseArena`].
pub type ClauseRef = usize;

/// Append-only storage for original and learned clauses.
#[derive(Default)]
pub struct ClauseArena {
    clauses: Vec<Vec<Lit>>,
}

impl ClauseArena {
    /// Add a clause to the arena, returning a reference to it.
    pub fn add_clause(&mut self, lits: impl Into<Vec<Lit>>) -> ClauseRef {
        let cref = self.clauses.len();
        self.clauses.push(lits.into());
        cref
    }

    /// The literals of a clause.
    pub fn lits(&self, cref: ClauseRef) -> &[Lit] {
        &self.clauses[cref]
    }

    /// Mutable access to the literals of a clause.
    ///
    /// Used by propagation to reorder a clause's literals so the watched pair stays at positions
    /// 0 and 1.
    pub fn lits_mut(&mut self, cref: ClauseRef) -> &mut Vec<Lit> {
        &mut self.clauses[cref]
    }

    /// Number of clauses currently in the arena.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnfsat_formula::lit;

    #[test]
    fn add_and_read_back() {
        let mut arena = ClauseArena::default();
        let cref = arena.add_clause(vec![lit![1], lit![-2]]);
        assert_eq!(arena.lits(cref), &[lit![1], lit![-2]]);
        assert_eq!(arena.len(), 1);
    }
}
