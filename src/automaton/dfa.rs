//! DFA input type and construction-time validation.

use rustc_hash::{FxHashMap, FxHashSet};

/// An input-alphabet symbol.
///
/// Symbols are opaque to the traverser: it only compares and hashes them.
/// Embedders map their alphabet (characters, tokens, event ids) onto `u32`
/// themselves.
pub type Symbol = u32;

/// A DFA state identifier. States are dense: `0..num_states`.
pub type StateId = u32;

/// Reserved sentinel carried by the initial record's character list.
///
/// Never a valid transition label; [`Dfa::new`] rejects it.
pub const EPSILON: Symbol = u32::MAX;

/// Validation failures surfaced when constructing a [`Dfa`].
///
/// All of these are programmer errors in the automaton description, not
/// runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DfaError {
    /// The initial state has no transition row.
    #[error("initial state {initial} out of range (automaton has {num_states} states)")]
    InitialStateOutOfRange {
        /// The offending initial state id
        initial: StateId,
        /// Number of states in the automaton
        num_states: usize,
    },

    /// A transition targets a state with no transition row.
    #[error("transition ({state}, {symbol}) -> {target} targets a state out of range (automaton has {num_states} states)")]
    TargetStateOutOfRange {
        /// Source state of the offending transition
        state: StateId,
        /// Symbol labeling the offending transition
        symbol: Symbol,
        /// The out-of-range target
        target: StateId,
        /// Number of states in the automaton
        num_states: usize,
    },

    /// A transition is labeled with the reserved [`EPSILON`] sentinel.
    #[error("state {state} has a transition labeled with the reserved epsilon sentinel")]
    EpsilonSymbol {
        /// Source state of the offending transition
        state: StateId,
    },
}

/// A deterministic finite automaton over dense integer states.
///
/// The traverser consults the automaton two ways: the forward probe
/// [`Dfa::step`] (once per tail expansion), and the grouped-reverse index
/// built from it at traverser construction. Undefined transitions are
/// allowed and mean "no accept edge on this symbol from this state".
///
/// # Example
///
/// ```
/// use dfa_mend::prelude::*;
///
/// // delta(0, 'a') = 1, accepting {1}
/// let dfa = Dfa::builder(0).transition(0, b'a' as Symbol, 1).accepting(1).build()?;
/// assert_eq!(dfa.step(0, b'a' as Symbol), Some(1));
/// assert_eq!(dfa.step(0, b'b' as Symbol), None);
/// # Ok::<(), DfaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Dfa {
    initial: StateId,
    transitions: Vec<FxHashMap<Symbol, StateId>>,
    finals: FxHashSet<StateId>,
}

impl Dfa {
    /// Construct a DFA from its transition table.
    ///
    /// `transitions[i]` is the row of state `i`; a state with no outgoing
    /// edges still needs an (empty) row. Final states outside `0..N` are
    /// tolerated: they are simply unreachable.
    ///
    /// # Errors
    ///
    /// Returns a [`DfaError`] if the initial state or any transition target
    /// has no row, or if any transition is labeled [`EPSILON`].
    pub fn new(
        initial: StateId,
        transitions: Vec<FxHashMap<Symbol, StateId>>,
        finals: impl IntoIterator<Item = StateId>,
    ) -> Result<Self, DfaError> {
        let num_states = transitions.len();

        if initial as usize >= num_states {
            return Err(DfaError::InitialStateOutOfRange {
                initial,
                num_states,
            });
        }

        for (state, row) in transitions.iter().enumerate() {
            for (&symbol, &target) in row {
                if symbol == EPSILON {
                    return Err(DfaError::EpsilonSymbol {
                        state: state as StateId,
                    });
                }
                if target as usize >= num_states {
                    return Err(DfaError::TargetStateOutOfRange {
                        state: state as StateId,
                        symbol,
                        target,
                        num_states,
                    });
                }
            }
        }

        Ok(Self {
            initial,
            transitions,
            finals: finals.into_iter().collect(),
        })
    }

    /// Start building a DFA incrementally.
    pub fn builder(initial: StateId) -> DfaBuilder {
        DfaBuilder::new(initial)
    }

    /// The initial state.
    #[inline]
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Number of states.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    /// Forward probe: `delta(state, symbol)`, or `None` when undefined.
    #[inline]
    pub fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions[state as usize].get(&symbol).copied()
    }

    /// Whether `state` is accepting.
    #[inline]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// The transition row of `state`, in arbitrary map order.
    ///
    /// The grouped-reverse index sorts by symbol before grouping, so
    /// nothing downstream depends on this order.
    #[inline]
    pub fn row(&self, state: StateId) -> &FxHashMap<Symbol, StateId> {
        &self.transitions[state as usize]
    }

    /// Run the DFA over `input` from the initial state.
    ///
    /// Returns the reached state, or `None` as soon as a transition is
    /// undefined. Used by embedders and tests to check completions.
    pub fn run(&self, input: impl IntoIterator<Item = Symbol>) -> Option<StateId> {
        let mut state = self.initial;
        for symbol in input {
            state = self.step(state, symbol)?;
        }
        Some(state)
    }

    /// Whether the DFA accepts `input` from the initial state.
    pub fn accepts(&self, input: impl IntoIterator<Item = Symbol>) -> bool {
        self.run(input).is_some_and(|state| self.is_final(state))
    }
}

/// Incremental [`Dfa`] construction.
///
/// Rows grow on demand: adding a transition or final state extends the
/// state range to cover it. Validation still happens in [`build`].
///
/// # Example
///
/// ```
/// use dfa_mend::prelude::*;
///
/// let dfa = Dfa::builder(0)
///     .transition(0, b'a' as Symbol, 1)
///     .transition(1, b'b' as Symbol, 2)
///     .accepting(2)
///     .build()?;
/// assert!(dfa.accepts([b'a' as Symbol, b'b' as Symbol]));
/// # Ok::<(), DfaError>(())
/// ```
///
/// [`build`]: DfaBuilder::build
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    initial: StateId,
    transitions: Vec<FxHashMap<Symbol, StateId>>,
    finals: FxHashSet<StateId>,
}

impl DfaBuilder {
    /// Create a builder with the given initial state.
    pub fn new(initial: StateId) -> Self {
        Self {
            initial,
            transitions: Vec::new(),
            finals: FxHashSet::default(),
        }
    }

    fn ensure_state(&mut self, state: StateId) {
        let needed = state as usize + 1;
        if self.transitions.len() < needed {
            self.transitions.resize_with(needed, FxHashMap::default);
        }
    }

    /// Add `delta(state, symbol) = target`, replacing any previous target.
    pub fn transition(mut self, state: StateId, symbol: Symbol, target: StateId) -> Self {
        self.ensure_state(state);
        self.ensure_state(target);
        self.transitions[state as usize].insert(symbol, target);
        self
    }

    /// Mark `state` as accepting.
    pub fn accepting(mut self, state: StateId) -> Self {
        self.ensure_state(state);
        self.finals.insert(state);
        self
    }

    /// Validate and build the [`Dfa`].
    ///
    /// # Errors
    ///
    /// Same failures as [`Dfa::new`]; with this builder only an initial
    /// state beyond every added state or an [`EPSILON`] label can occur.
    pub fn build(mut self) -> Result<Dfa, DfaError> {
        self.ensure_state(self.initial);
        Dfa::new(self.initial, self.transitions, self.finals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entries: &[(Symbol, StateId)]) -> FxHashMap<Symbol, StateId> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_step_and_finals() {
        let dfa = Dfa::new(0, vec![row(&[(1, 1)]), row(&[])], [1]).unwrap();

        assert_eq!(dfa.initial(), 0);
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.step(0, 1), Some(1));
        assert_eq!(dfa.step(0, 2), None);
        assert!(dfa.is_final(1));
        assert!(!dfa.is_final(0));
    }

    #[test]
    fn test_initial_out_of_range() {
        let err = Dfa::new(2, vec![row(&[]), row(&[])], []).unwrap_err();
        assert_eq!(
            err,
            DfaError::InitialStateOutOfRange {
                initial: 2,
                num_states: 2
            }
        );
    }

    #[test]
    fn test_target_out_of_range() {
        let err = Dfa::new(0, vec![row(&[(7, 3)])], []).unwrap_err();
        assert_eq!(
            err,
            DfaError::TargetStateOutOfRange {
                state: 0,
                symbol: 7,
                target: 3,
                num_states: 1
            }
        );
    }

    #[test]
    fn test_epsilon_label_rejected() {
        let err = Dfa::new(0, vec![row(&[(EPSILON, 0)])], []).unwrap_err();
        assert_eq!(err, DfaError::EpsilonSymbol { state: 0 });
    }

    #[test]
    fn test_run_and_accepts() {
        let dfa = Dfa::builder(0)
            .transition(0, 1, 1)
            .transition(1, 2, 0)
            .accepting(1)
            .build()
            .unwrap();

        assert_eq!(dfa.run([1, 2, 1]), Some(1));
        assert!(dfa.accepts([1, 2, 1]));
        assert!(!dfa.accepts([1, 2]));
        assert_eq!(dfa.run([3]), None);
        assert!(!dfa.accepts([3]));
    }

    #[test]
    fn test_builder_grows_states() {
        let dfa = Dfa::builder(0).transition(0, 5, 4).accepting(4).build().unwrap();
        assert_eq!(dfa.num_states(), 5);
        assert_eq!(dfa.step(0, 5), Some(4));
        assert!(dfa.row(3).is_empty());
    }

    #[test]
    fn test_builder_initial_only() {
        // An automaton with a single stateless row is still valid.
        let dfa = Dfa::builder(0).accepting(0).build().unwrap();
        assert!(dfa.accepts([]));
    }
}
