//! # dfa-mend
//!
//! Enumerate the minimal symbol insertions that make an input sequence
//! accepted by a DFA.
//!
//! Given an automaton and a lazily pulled input, [`Traverser::execute`]
//! returns every distinct derivation trace that reaches an accepting
//! state. A trace interleaves *accept* steps (a real input symbol was
//! consumed) with *missing* steps (any of the listed symbols could be
//! inserted at that point); traces that merely re-enter a state without
//! consuming input, or that pay extra insertions for a route a cheaper
//! trace already covers, are pruned during the traversal.
//!
//! ## Example
//!
//! ```rust
//! use dfa_mend::prelude::*;
//!
//! // delta(0,a)=1, delta(1,b)=2, accepting {2}
//! let dfa = Dfa::builder(0)
//!     .transition(0, b'a' as Symbol, 1)
//!     .transition(1, b'b' as Symbol, 2)
//!     .accepting(2)
//!     .build()
//!     .unwrap();
//!
//! let traverser = Traverser::new(dfa);
//! for record in traverser.execute_iter([b'a' as Symbol]) {
//!     for step in record.completion() {
//!         println!("{:?} -> state {}", step.characters, step.target_state);
//!     }
//! }
//! ```
//!
//! The automaton and its derived index are immutable after construction;
//! each `execute` call keeps its own buffering and result state, so one
//! traverser serves any number of inputs.
//!
//! [`Traverser::execute`]: traverser::Traverser::execute

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod traverser;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{Dfa, DfaBuilder, DfaError, StateId, Symbol, EPSILON};
    pub use crate::traverser::{BuilderError, Record, Step, Traverser, TraverserBuilder};
}
