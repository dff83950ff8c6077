//! Generation-by-generation traversal producing minimal-insertion
//! derivations.

mod builder;
mod generation;
mod input;
mod pruner;
mod record;

pub use builder::{BuilderError, TraverserBuilder};
pub use pruner::uselessly_extends;
pub use record::{Record, Step};

use std::rc::Rc;

use log::{debug, trace};

use crate::automaton::{Dfa, GroupedReverse, Symbol};
use generation::Generation;
use input::InputCursor;
use pruner::{is_useful_alternative, shortcut_suppresses_accept};

/// Traverser enumerating every minimal way to insert symbols into an
/// input sequence so that the automaton accepts it.
///
/// Construction builds the grouped-reverse index once; [`execute`] can
/// then run any number of inputs against it. The automaton and index are
/// immutable, so cloning a `Traverser` is cheap enough to hand one to
/// each input source when an embedder keeps several alive.
///
/// # Example
///
/// ```
/// use dfa_mend::prelude::*;
///
/// // delta(0,a)=1, delta(1,b)=2, accepting {2}
/// let dfa = Dfa::builder(0)
///     .transition(0, b'a' as Symbol, 1)
///     .transition(1, b'b' as Symbol, 2)
///     .accepting(2)
///     .build()
///     .unwrap();
/// let traverser = Traverser::new(dfa);
///
/// // The input is missing the leading 'a'.
/// let finals = traverser.execute_iter([b'b' as Symbol]);
/// assert_eq!(finals.len(), 1);
/// let steps = finals[0].completion();
/// assert!(!steps[0].accepted);
/// assert_eq!(steps[0].characters, vec![b'a' as Symbol]);
/// assert!(steps[1].accepted);
/// ```
///
/// [`execute`]: Traverser::execute
#[derive(Debug, Clone)]
pub struct Traverser {
    dfa: Dfa,
    grouped: GroupedReverse,
}

impl Traverser {
    /// Create a traverser for `dfa`, building its grouped-reverse index.
    pub fn new(dfa: Dfa) -> Self {
        let grouped = GroupedReverse::build(&dfa);
        Self { dfa, grouped }
    }

    /// Start building a traverser.
    pub fn builder() -> TraverserBuilder {
        TraverserBuilder::new()
    }

    /// The automaton this traverser runs against.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Enumerate the final records for the input produced by `source`.
    ///
    /// `source` is pulled lazily and at most once per position; `None`
    /// means end-of-input. Each returned record's chain, read from the
    /// initial record forward, interleaves accept steps with missing
    /// steps and reproduces the input through its accept characters.
    /// Output is deterministic in content and order for identical inputs.
    pub fn execute<F>(&self, source: F) -> Vec<Rc<Record>>
    where
        F: FnMut() -> Option<Symbol>,
    {
        Execution {
            traverser: self,
            cursor: InputCursor::new(source),
            finals: Vec::new(),
        }
        .run()
    }

    /// [`execute`] over anything iterable, for callers whose input is
    /// already materialized.
    ///
    /// [`execute`]: Traverser::execute
    pub fn execute_iter<I>(&self, input: I) -> Vec<Rc<Record>>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut iter = input.into_iter();
        self.execute(move || iter.next())
    }
}

/// Mutable state of one `execute` call.
struct Execution<'t, F> {
    traverser: &'t Traverser,
    cursor: InputCursor<F>,
    finals: Vec<Rc<Record>>,
}

impl<F> Execution<'_, F>
where
    F: FnMut() -> Option<Symbol>,
{
    fn run(mut self) -> Vec<Rc<Record>> {
        let initial = Record::initial(self.traverser.dfa.initial());
        let mut tails = vec![initial];

        while !tails.is_empty() {
            debug!("generation of {} tails", tails.len());
            let mut next = Generation::new();

            for i in 0..tails.len() {
                let tail = &tails[i];
                if tail.has_loops(0) {
                    trace!("pruned looping tail in state {}", tail.target_state());
                    continue;
                }
                if !is_useful_alternative(tail, &self.finals, &tails[..i]) {
                    trace!("pruned useless tail in state {}", tail.target_state());
                    continue;
                }
                if self.is_final_record(tail) {
                    self.finals.push(Rc::clone(tail));
                    continue;
                }
                self.expand(tail, &mut next);
            }

            tails = next.into_tails();
        }

        debug!(
            "traversal done: {} final records over {} input symbols",
            self.finals.len(),
            self.cursor.len()
        );
        self.finals
    }

    /// A record is final when it sits in an accepting state, has consumed
    /// every buffered symbol, and one more read attempt confirms the
    /// input is exhausted.
    fn is_final_record(&mut self, record: &Rc<Record>) -> bool {
        self.traverser.dfa.is_final(record.target_state())
            && record.accepted_count() == self.cursor.len()
            && self.cursor.get(record.accepted_count()).is_none()
    }

    /// Produce the children of `tail` into `next`.
    ///
    /// One accept child when the next input symbol has a transition (and
    /// the shortcut check does not suppress it), one partial-missing
    /// child when that transition's group offers alternatives, and one
    /// missing child per remaining group of the tail's state.
    fn expand(&mut self, tail: &Rc<Record>, next: &mut Generation) {
        let state = tail.target_state();
        let symbol = self.cursor.get(tail.accepted_count());
        let next_state = symbol.and_then(|symbol| self.traverser.dfa.step(state, symbol));
        let groups = self.traverser.grouped.state(state);

        if let (Some(symbol), Some(next_state)) = (symbol, next_state) {
            if shortcut_suppresses_accept(&self.traverser.dfa, tail, symbol, next_state) {
                trace!(
                    "shortcut suppressed accept of {} into state {}",
                    symbol,
                    next_state
                );
            } else {
                next.insert(Record::accept(tail, symbol, next_state));
            }

            if let Some(group) = groups.group_for(next_state) {
                if group.len() >= 2 {
                    next.insert(Record::partial_missing(tail, group, symbol, next_state));
                }
            }
        }

        for (target, symbols) in groups.iter() {
            if Some(target) == next_state {
                continue;
            }
            next.insert(Record::missing(tail, symbols, target));
        }
    }
}
