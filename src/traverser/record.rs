//! Derivation records: immutable trace nodes sharing ancestry.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::automaton::{StateId, Symbol, EPSILON};

/// One step of a derivation trace.
///
/// A record links to its predecessor, so a tail record *is* the whole
/// derivation: many tails and finals share ancestry through the `prev`
/// chain, and no record is ever mutated after construction.
///
/// An *accept* record consumed one real input symbol (`characters` holds
/// exactly that symbol). A *missing* record hypothetically inserted a
/// symbol; `characters` lists every symbol that produces the step's
/// transition, any one of which completes the derivation equally.
///
/// `accepted_count`, `missing_count` and the nearest accept ancestor are
/// each the parent's value plus a constant, so they are cached at
/// construction rather than recomputed by chain walks.
#[derive(Debug)]
pub struct Record {
    prev: Option<Rc<Record>>,
    target_state: StateId,
    characters: SmallVec<[Symbol; 4]>,
    accepted: bool,
    accepted_count: usize,
    missing_count: usize,
    /// Nearest accept ancestor, excluding self.
    prior_accept: Option<Rc<Record>>,
}

/// One derivation step in the flattened view produced by
/// [`Record::completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The symbols of this step. One element for an accept step; for a
    /// missing step, any listed symbol can be inserted here.
    pub characters: Vec<Symbol>,
    /// The DFA state the step lands in.
    pub target_state: StateId,
    /// Whether the step consumed a real input symbol.
    pub accepted: bool,
}

impl Record {
    /// The root record every derivation of one traversal shares.
    ///
    /// It consumes nothing (`characters = [EPSILON]`, `accepted_count`
    /// stays 0) but counts as an accept record, so the shortcut check is
    /// meaningful from the first expansion.
    pub fn initial(initial_state: StateId) -> Rc<Record> {
        Rc::new(Record {
            prev: None,
            target_state: initial_state,
            characters: SmallVec::from_slice(&[EPSILON]),
            accepted: true,
            accepted_count: 0,
            missing_count: 0,
            prior_accept: None,
        })
    }

    fn prior_accept_of(prev: &Rc<Record>) -> Option<Rc<Record>> {
        if prev.accepted {
            Some(Rc::clone(prev))
        } else {
            prev.prior_accept.clone()
        }
    }

    /// An accept step: consume `symbol` and land in `target`.
    pub fn accept(prev: &Rc<Record>, symbol: Symbol, target: StateId) -> Rc<Record> {
        Rc::new(Record {
            target_state: target,
            characters: SmallVec::from_slice(&[symbol]),
            accepted: true,
            accepted_count: prev.accepted_count + 1,
            missing_count: prev.missing_count,
            prior_accept: Self::prior_accept_of(prev),
            prev: Some(Rc::clone(prev)),
        })
    }

    /// A missing step: hypothetically insert any of `symbols` to land in
    /// `target`. `symbols` must be non-empty.
    pub fn missing(prev: &Rc<Record>, symbols: &[Symbol], target: StateId) -> Rc<Record> {
        debug_assert!(!symbols.is_empty());
        Rc::new(Record {
            target_state: target,
            characters: SmallVec::from_slice(symbols),
            accepted: false,
            accepted_count: prev.accepted_count,
            missing_count: prev.missing_count + 1,
            prior_accept: Self::prior_accept_of(prev),
            prev: Some(Rc::clone(prev)),
        })
    }

    /// A missing step carrying `symbols` minus the first occurrence of
    /// `excluded`. The caller guarantees `symbols.len() >= 2`, so the
    /// resulting list is non-empty.
    pub fn partial_missing(
        prev: &Rc<Record>,
        symbols: &[Symbol],
        excluded: Symbol,
        target: StateId,
    ) -> Rc<Record> {
        debug_assert!(symbols.len() >= 2);
        let mut characters: SmallVec<[Symbol; 4]> = SmallVec::with_capacity(symbols.len() - 1);
        let mut removed = false;
        for &symbol in symbols {
            if !removed && symbol == excluded {
                removed = true;
            } else {
                characters.push(symbol);
            }
        }
        debug_assert!(removed, "excluded symbol not present in group");
        Rc::new(Record {
            target_state: target,
            characters,
            accepted: false,
            accepted_count: prev.accepted_count,
            missing_count: prev.missing_count + 1,
            prior_accept: Self::prior_accept_of(prev),
            prev: Some(Rc::clone(prev)),
        })
    }

    /// The preceding record, or `None` for the initial record.
    #[inline]
    pub fn prev(&self) -> Option<&Rc<Record>> {
        self.prev.as_ref()
    }

    /// The DFA state this record lands in.
    #[inline]
    pub fn target_state(&self) -> StateId {
        self.target_state
    }

    /// The symbols of this step.
    #[inline]
    pub fn characters(&self) -> &[Symbol] {
        &self.characters
    }

    /// Whether this step consumed a real input symbol.
    #[inline]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Real input symbols consumed up to and including this record.
    #[inline]
    pub fn accepted_count(&self) -> usize {
        self.accepted_count
    }

    /// Insertion steps along the chain up to and including this record.
    /// Lower is better.
    #[inline]
    pub fn missing_count(&self) -> usize {
        self.missing_count
    }

    /// `accepted_count + missing_count`.
    #[inline]
    pub fn total_count(&self) -> usize {
        self.accepted_count + self.missing_count
    }

    /// Whether this is the root record of its traversal.
    #[inline]
    pub fn is_initial(&self) -> bool {
        self.prev.is_none()
    }

    /// The nearest accept record in the chain, including self.
    pub fn last_accept(self: &Rc<Self>) -> Option<Rc<Record>> {
        if self.accepted {
            Some(Rc::clone(self))
        } else {
            self.prior_accept.clone()
        }
    }

    /// Whether the chain above this record re-enters a DFA state without
    /// consuming new input.
    ///
    /// True iff two ancestors (the record itself excluded) share the same
    /// `(target_state, accepted_count)` and lie more than `min_len` steps
    /// apart. The traverser invokes this with `min_len = 0`: any repeat is
    /// strictly redundant. `accepted_count` is non-increasing toward the
    /// root, so each inner scan stops at the first older count.
    pub fn has_loops(&self, min_len: usize) -> bool {
        let mut outer = self.prev.as_deref();
        while let Some(candidate) = outer {
            let mut steps = 0usize;
            let mut inner = candidate.prev.as_deref();
            while let Some(older) = inner {
                steps += 1;
                if older.accepted_count < candidate.accepted_count {
                    break;
                }
                if older.target_state == candidate.target_state && steps > min_len {
                    return true;
                }
                inner = older.prev.as_deref();
            }
            outer = candidate.prev.as_deref();
        }
        false
    }

    /// Whether this record explored all but one of the insertion symbols
    /// `other` did: both missing, same target state, and `characters` is
    /// `other.characters` with exactly one element removed.
    pub fn is_partial_of(&self, other: &Record) -> bool {
        if self.accepted || other.accepted {
            return false;
        }
        if self.target_state != other.target_state {
            return false;
        }
        if self.characters.len() + 1 != other.characters.len() {
            return false;
        }

        let mut i = 0;
        let mut skipped = false;
        for &symbol in &other.characters {
            if i < self.characters.len() && self.characters[i] == symbol {
                i += 1;
            } else if !skipped {
                skipped = true;
            } else {
                return false;
            }
        }
        i == self.characters.len()
    }

    /// The chain from the initial record to this one, root first.
    pub fn chain(self: &Rc<Self>) -> Vec<Rc<Record>> {
        let mut chain = Vec::with_capacity(self.total_count() + 1);
        let mut cur = Some(self);
        while let Some(record) = cur {
            chain.push(Rc::clone(record));
            cur = record.prev.as_ref();
        }
        chain.reverse();
        chain
    }

    /// The derivation as a flat list of steps, root first, initial record
    /// skipped.
    ///
    /// Concatenating one chosen symbol per step (the accept steps offer no
    /// choice) yields a sequence the DFA accepts whenever this record came
    /// back as a final record.
    pub fn completion(self: &Rc<Self>) -> Vec<Step> {
        self.chain()
            .iter()
            .filter(|record| !record.is_initial())
            .map(|record| Step {
                characters: record.characters.to_vec(),
                target_state: record.target_state,
                accepted: record.accepted,
            })
            .collect()
    }
}
