//! Assignment, trail and two-watched-literals propagation for the CDCL engine.

mod assignment;
mod bcp;
mod watch;

pub use assignment::{
    backtrack, enqueue_assignment, Assignment, Conflict, ImplGraph, Reason, Trail,
};
pub use bcp::propagate;
pub use watch::{Watch, Watchlists};
