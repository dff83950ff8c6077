//! Grouped-reverse transition index.

use smallvec::SmallVec;

use super::dfa::{Dfa, StateId, Symbol};

/// Symbols of one state grouped by the state they lead to.
type Group = (StateId, SmallVec<[Symbol; 4]>);

/// The outgoing transitions of one state, clustered by target.
///
/// Invariant: concatenating the groups yields the state's transition
/// domain exactly once each. Group order is first-appearance order under
/// symbol-sorted iteration, so it is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateGroups {
    groups: Vec<Group>,
}

impl StateGroups {
    /// Iterate `(target, symbols)` groups in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &[Symbol])> {
        self.groups.iter().map(|(target, symbols)| (*target, symbols.as_slice()))
    }

    /// The symbol list leading to `target`, if any transition does.
    pub fn group_for(&self, target: StateId) -> Option<&[Symbol]> {
        self.groups
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, symbols)| symbols.as_slice())
    }

    /// Number of distinct targets reachable in one step.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the state has no outgoing transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Per-state grouped-reverse view of a [`Dfa`], built once and read-only
/// thereafter.
///
/// For each state, the outgoing symbols are clustered by destination so
/// that one missing record can carry every symbol producing the same
/// transition. Symbols inside a group and the groups themselves follow
/// symbol-sorted transition order, which makes traversal output
/// deterministic regardless of hash-map iteration order.
#[derive(Debug, Clone)]
pub struct GroupedReverse {
    states: Vec<StateGroups>,
}

impl GroupedReverse {
    /// Build the index for every state of `dfa`.
    pub fn build(dfa: &Dfa) -> Self {
        let states = (0..dfa.num_states() as StateId)
            .map(|state| {
                let mut items: Vec<(Symbol, StateId)> =
                    dfa.row(state).iter().map(|(&s, &t)| (s, t)).collect();
                items.sort_unstable_by_key(|&(symbol, _)| symbol);

                let mut groups: Vec<Group> = Vec::new();
                for (symbol, target) in items {
                    match groups.iter_mut().find(|(t, _)| *t == target) {
                        Some((_, symbols)) => symbols.push(symbol),
                        None => groups.push((target, SmallVec::from_slice(&[symbol]))),
                    }
                }
                StateGroups { groups }
            })
            .collect();

        Self { states }
    }

    /// The groups of `state`.
    #[inline]
    pub fn state(&self, state: StateId) -> &StateGroups {
        &self.states[state as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::dfa::Dfa;

    #[test]
    fn test_groups_cluster_by_target() {
        // delta(0,a)=1, delta(0,b)=1, delta(0,c)=2
        let dfa = Dfa::builder(0)
            .transition(0, 10, 1)
            .transition(0, 11, 1)
            .transition(0, 12, 2)
            .build()
            .unwrap();
        let index = GroupedReverse::build(&dfa);

        let groups: Vec<_> = index.state(0).iter().collect();
        assert_eq!(groups, vec![(1, &[10, 11][..]), (2, &[12][..])]);
        assert_eq!(index.state(0).group_for(1), Some(&[10, 11][..]));
        assert_eq!(index.state(0).group_for(3), None);
    }

    #[test]
    fn test_group_order_follows_symbol_order() {
        // Lowest symbol decides which target's group appears first.
        let dfa = Dfa::builder(0)
            .transition(0, 20, 2)
            .transition(0, 5, 1)
            .transition(0, 7, 2)
            .build()
            .unwrap();
        let index = GroupedReverse::build(&dfa);

        let groups: Vec<_> = index.state(0).iter().collect();
        assert_eq!(groups, vec![(1, &[5][..]), (2, &[7, 20][..])]);
    }

    #[test]
    fn test_concatenation_covers_domain_once() {
        let dfa = Dfa::builder(0)
            .transition(0, 1, 1)
            .transition(0, 2, 0)
            .transition(0, 3, 1)
            .transition(1, 4, 0)
            .build()
            .unwrap();
        let index = GroupedReverse::build(&dfa);

        for state in 0..2 {
            let mut symbols: Vec<_> = index
                .state(state)
                .iter()
                .flat_map(|(_, symbols)| symbols.iter().copied())
                .collect();
            symbols.sort_unstable();
            let mut domain: Vec<_> = dfa.row(state).keys().copied().collect();
            domain.sort_unstable();
            assert_eq!(symbols, domain);
        }
    }

    #[test]
    fn test_empty_state() {
        let dfa = Dfa::builder(0).transition(0, 1, 1).build().unwrap();
        let index = GroupedReverse::build(&dfa);
        assert!(index.state(1).is_empty());
        assert_eq!(index.state(1).len(), 0);
    }
}
