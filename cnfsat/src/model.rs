//! Final result of a solve: either a satisfying assignment or an unsat verdict.

use cnfsat_formula::{Lit, Var};

/// A total assignment over all declared variables.
#[derive(Debug, Eq, PartialEq)]
pub struct Model {
    lits: Vec<Lit>,
}

impl Model {
    pub(crate) fn from_assignment(assignment: &[Option<bool>]) -> Model {
        let lits = assignment
            .iter()
            .enumerate()
            .map(|(index, value)| Lit::from_var(Var::from_index(index), value.unwrap_or(true)))
            .collect();
        Model { lits }
    }

    /// The model as a vector of literals, one per declared variable, each polarity matching the
    /// assigned value. Unassigned variables (possible if a variable never appears in any clause)
    /// are reported positive.
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// Whether the model satisfies every clause of a formula.
    pub fn satisfies<'a>(&self, clauses: impl IntoIterator<Item = &'a [Lit]>) -> bool {
        clauses
            .into_iter()
            .all(|clause| clause.iter().any(|lit| self.lits.contains(lit)))
    }
}
