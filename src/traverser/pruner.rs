//! Predicates deciding which tails are worth expanding.
//!
//! A tail survives when it is loop-free and a useful alternative to every
//! previously found final record and every cheaper peer of its generation.
//! A third, local check suppresses accept children that duplicate a route
//! already reachable without the intervening insertions.

use std::rc::Rc;

use crate::automaton::{Dfa, StateId, Symbol};
use crate::traverser::record::Record;

/// Whether `tested` reaches the same `(state, accepted_count)` as a record
/// in `reference`'s chain via a structurally comparable path that paid
/// more insertions.
///
/// The reference chain is walked for a *base*: the first record at
/// `tested`'s accepted count and target state (counts are non-increasing
/// toward the root, so the walk stops once they drop below). `tested` then
/// extends the base when walking both chains back shows `tested`'s chain
/// to be the base's chain with extra interstitial missing records, each
/// skipped step being either shared outright or a partial variant of the
/// base-side record.
pub fn uselessly_extends(tested: &Rc<Record>, reference: &Rc<Record>) -> bool {
    match find_base(tested, reference) {
        Some(base) => extends_base(tested, base),
        None => false,
    }
}

fn find_base<'a>(tested: &Rc<Record>, reference: &'a Rc<Record>) -> Option<&'a Rc<Record>> {
    let mut cur = Some(reference);
    while let Some(record) = cur {
        if record.accepted_count() < tested.accepted_count() {
            return None;
        }
        if record.accepted_count() == tested.accepted_count()
            && record.target_state() == tested.target_state()
        {
            return Some(record);
        }
        cur = record.prev();
    }
    None
}

fn extends_base(tested: &Rc<Record>, base: &Rc<Record>) -> bool {
    let mut t = Some(tested);
    let mut b = Some(base);
    loop {
        let Some(tr) = t else {
            // tested ran out before meeting the base chain
            return false;
        };
        let Some(br) = b else {
            // the whole base chain was matched with steps to spare
            return true;
        };
        if Rc::ptr_eq(tr, br) {
            return true;
        }
        if tr.total_count() < br.total_count() {
            return false;
        }
        if tr.is_partial_of(br) {
            t = tr.prev();
            b = br.prev();
        } else {
            // tested may have inserted extra missing records the base did
            // not; advance the newer side only
            t = tr.prev();
        }
    }
}

/// P2: `tested` survives iff it does not uselessly extend any already
/// final record or any peer placed earlier in the current generation.
///
/// Later peers are deliberately not consulted: they carry an equal or
/// higher missing count and are themselves tested against this record
/// when their turn comes.
pub(crate) fn is_useful_alternative(
    tested: &Rc<Record>,
    finals: &[Rc<Record>],
    earlier_peers: &[Rc<Record>],
) -> bool {
    finals
        .iter()
        .chain(earlier_peers)
        .filter(|&reference| !Rc::ptr_eq(reference, tested))
        .all(|reference| !uselessly_extends(tested, reference))
}

/// P3: whether the accept child of `tail` on `symbol` into `next_state`
/// duplicates a transition already available from the last accept record.
///
/// Only missing tails are subject to the check; the initial record counts
/// as an accept record, so it applies from the first expansion.
pub(crate) fn shortcut_suppresses_accept(
    dfa: &Dfa,
    tail: &Rc<Record>,
    symbol: Symbol,
    next_state: StateId,
) -> bool {
    if tail.accepted() {
        return false;
    }
    match tail.last_accept() {
        Some(last) => dfa.step(last.target_state(), symbol) == Some(next_state),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Dfa;

    #[test]
    fn test_extension_of_own_ancestor_is_useless() {
        // accept(a) -> 1, then insert a symbol looping back to state 1 at
        // the same accepted count: the loop paid one insertion for nothing.
        let initial = Record::initial(0);
        let a = Record::accept(&initial, 10, 1);
        let looped = Record::missing(&a, &[11], 1);

        assert!(uselessly_extends(&looped, &a));
        assert!(!uselessly_extends(&a, &looped));
    }

    #[test]
    fn test_no_base_candidate_means_useful() {
        let initial = Record::initial(0);
        let a = Record::accept(&initial, 10, 1);
        // Different target state at every accepted count of a's chain.
        let m = Record::missing(&initial, &[11], 2);
        assert!(!uselessly_extends(&m, &a));
    }

    #[test]
    fn test_partial_variant_with_extra_missing_is_useless() {
        // reference: initial -> missing{a,b} -> 1
        // tested:    initial -> missing{c} -> 2 -> missing{a} -> 1
        // tested's head is a partial of the reference head but spent an
        // extra insertion getting there.
        let initial = Record::initial(0);
        let reference = Record::missing(&initial, &[10, 11], 1);
        let detour = Record::missing(&initial, &[12], 2);
        let tested = Record::partial_missing(&detour, &[10, 11], 11, 1);

        assert!(uselessly_extends(&tested, &reference));
    }

    #[test]
    fn test_cheaper_chain_is_not_useless() {
        // tested reaches the same configuration with a strictly smaller
        // total count: the walk stops without confirming an extension.
        let initial = Record::initial(0);
        let long_a = Record::missing(&initial, &[10], 2);
        let long_b = Record::missing(&long_a, &[11], 3);
        let reference = Record::missing(&long_b, &[12], 1);
        let tested = Record::missing(&initial, &[12], 1);

        assert!(!uselessly_extends(&tested, &reference));
    }

    #[test]
    fn test_divergent_route_is_useful() {
        // Two genuinely different insertion routes into the same state.
        let initial = Record::initial(0);
        let via_a = Record::missing(&initial, &[10], 1);
        let via_b_1 = Record::missing(&initial, &[11], 2);
        let via_b = Record::missing(&via_b_1, &[12], 1);

        // via_b pays more but its steps are neither shared with via_a's
        // chain nor partials of them.
        assert!(!uselessly_extends(&via_b, &via_a));
    }

    #[test]
    fn test_is_useful_alternative_skips_self() {
        let initial = Record::initial(0);
        let a = Record::accept(&initial, 10, 1);
        let peers = vec![Rc::clone(&a)];
        assert!(is_useful_alternative(&a, &[], &peers));
    }

    #[test]
    fn test_is_useful_alternative_against_finals() {
        let initial = Record::initial(0);
        let a = Record::accept(&initial, 10, 1);
        let looped = Record::missing(&a, &[11], 1);

        assert!(!is_useful_alternative(&looped, &[Rc::clone(&a)], &[]));
        assert!(is_useful_alternative(&looped, &[], &[]));
    }

    #[test]
    fn test_shortcut_suppresses_duplicate_route() {
        // delta(0,s)=1 and delta(1,s)=1: after inserting into state 1, the
        // accept of s into 1 duplicates the direct route from the initial
        // record.
        let dfa = Dfa::builder(0)
            .transition(0, 7, 1)
            .transition(1, 7, 1)
            .build()
            .unwrap();
        let initial = Record::initial(0);
        let inserted = Record::missing(&initial, &[9], 1);

        assert!(shortcut_suppresses_accept(&dfa, &inserted, 7, 1));
        // Accept tails are never subject to the check.
        let accepted = Record::accept(&initial, 7, 1);
        assert!(!shortcut_suppresses_accept(&dfa, &accepted, 7, 1));
    }

    #[test]
    fn test_shortcut_requires_matching_target() {
        let dfa = Dfa::builder(0)
            .transition(0, 7, 2)
            .transition(1, 7, 1)
            .build()
            .unwrap();
        let initial = Record::initial(0);
        let inserted = Record::missing(&initial, &[9], 1);

        // From the last accept record (the initial record) symbol 7 goes
        // to state 2, not to the accept child's state 1.
        assert!(!shortcut_suppresses_accept(&dfa, &inserted, 7, 1));
    }
}
