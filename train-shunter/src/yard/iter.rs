use std::iter::FusedIterator;

use super::{WagonKey, Yard};

/// Iterator over a wagon and its successors, front to back.
///
/// Created by [`Yard::sequence`] and by the train traversal methods.
/// Mutating the yard while iterating is prevented by the shared borrow.
#[derive(Debug, Clone)]
pub struct SequenceIter<'a> {
    yard: &'a Yard,
    current: Option<WagonKey>,
}

impl<'a> SequenceIter<'a> {
    pub(crate) fn new(yard: &'a Yard, start: Option<WagonKey>) -> Self {
        Self {
            yard,
            current: start,
        }
    }
}

impl Iterator for SequenceIter<'_> {
    type Item = WagonKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        self.current = self.yard.wagon(key).next;
        Some(key)
    }
}

impl FusedIterator for SequenceIter<'_> {}
