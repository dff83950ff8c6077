//! Deterministic finite automata and the transition indices the traverser
//! consults during expansion.

mod dfa;
mod index;

pub use dfa::{Dfa, DfaBuilder, DfaError, StateId, Symbol, EPSILON};
pub use index::{GroupedReverse, StateGroups};
