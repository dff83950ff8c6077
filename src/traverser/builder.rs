//! Builder pattern for creating Traverser instances.

use crate::automaton::Dfa;
use crate::traverser::Traverser;

/// Error type for builder validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// No automaton was provided
    #[error("Automaton is required. Use .dfa() to set it.")]
    MissingDfa,
}

/// Builder for constructing a [`Traverser`] with a fluent API.
///
/// # Example
///
/// ```
/// use dfa_mend::prelude::*;
///
/// let dfa = Dfa::builder(0).transition(0, 1, 1).accepting(1).build().unwrap();
/// let traverser = TraverserBuilder::new().dfa(dfa).build()?;
/// # Ok::<(), BuilderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraverserBuilder {
    dfa: Option<Dfa>,
}

impl TraverserBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        TraverserBuilder { dfa: None }
    }

    /// Set the automaton to traverse.
    pub fn dfa(mut self, dfa: Dfa) -> Self {
        self.dfa = Some(dfa);
        self
    }

    /// Build the [`Traverser`].
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingDfa`] if no automaton was set.
    pub fn build(self) -> Result<Traverser, BuilderError> {
        let dfa = self.dfa.ok_or(BuilderError::MissingDfa)?;
        Ok(Traverser::new(dfa))
    }
}
