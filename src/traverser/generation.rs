//! Next-generation tail list ordered by missing count.

use std::rc::Rc;

use crate::traverser::record::Record;

/// A generation of tails kept sorted by ascending missing count.
///
/// Insertion is a binary search for the upper bound, so a new record goes
/// *after* existing records with the same count. Cheaper tails therefore
/// come first and, within a count, older insertions keep priority, which
/// is what the useful-alternative check relies on when it compares a tail
/// against its earlier peers.
#[derive(Debug, Default)]
pub(crate) struct Generation {
    tails: Vec<Rc<Record>>,
}

impl Generation {
    pub(crate) fn new() -> Self {
        Self { tails: Vec::new() }
    }

    /// Insert `record` at its upper-bound position by missing count.
    pub(crate) fn insert(&mut self, record: Rc<Record>) {
        let count = record.missing_count();
        let position = self
            .tails
            .partition_point(|tail| tail.missing_count() <= count);
        self.tails.insert(position, record);
    }

    pub(crate) fn into_tails(self) -> Vec<Rc<Record>> {
        self.tails
    }
}
