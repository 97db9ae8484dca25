//! Overall solver state.

/// Satisfiability state.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SatState {
    Unknown,
    Sat,
    Unsat,
}

impl Default for SatState {
    fn default() -> SatState {
        SatState::Unknown
    }
}
