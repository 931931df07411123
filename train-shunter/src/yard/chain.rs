//! Link surgery on wagon chains.
//!
//! Nothing here knows about trains, engines or compatibility. Every
//! operation either succeeds and leaves all links symmetric and acyclic,
//! or fails before touching any link.

use tracing::trace;

use crate::domain::ChainError;

use super::{SequenceIter, WagonKey, Yard};

impl Yard {
    /// Does `w` have a wagon coupled behind it?
    pub fn has_next(&self, w: WagonKey) -> bool {
        self.wagon(w).next.is_some()
    }

    /// Does `w` have a wagon coupled in front of it?
    pub fn has_previous(&self, w: WagonKey) -> bool {
        self.wagon(w).prev.is_some()
    }

    pub fn next_of(&self, w: WagonKey) -> Option<WagonKey> {
        self.wagon(w).next
    }

    pub fn previous_of(&self, w: WagonKey) -> Option<WagonKey> {
        self.wagon(w).prev
    }

    /// Iterate over `w` and all of its successors.
    pub fn sequence(&self, w: WagonKey) -> SequenceIter<'_> {
        SequenceIter::new(self, Some(w))
    }

    /// Returns the last wagon of the sequence starting at `w`.
    ///
    /// A standalone wagon is its own last wagon.
    pub fn last_of(&self, w: WagonKey) -> WagonKey {
        let mut current = w;
        while let Some(next) = self.wagon(current).next {
            current = next;
        }
        current
    }

    /// Returns the head of the chain `w` belongs to.
    pub fn first_of(&self, w: WagonKey) -> WagonKey {
        let mut current = w;
        while let Some(prev) = self.wagon(current).prev {
            current = prev;
        }
        current
    }

    /// Counts `w` and all of its successors.
    pub fn sequence_length(&self, w: WagonKey) -> usize {
        self.sequence(w).count()
    }

    /// Is `target` equal to `from` or one of its successors?
    pub(crate) fn reaches(&self, from: WagonKey, target: WagonKey) -> bool {
        self.sequence(from).any(|k| k == target)
    }

    fn ensure_outside_tail(&self, w: WagonKey, target: WagonKey) -> Result<(), ChainError> {
        if self.reaches(w, target) {
            return Err(ChainError::SelfAttachmentConflict {
                wagon: self.id_of(w),
                target: self.id_of(target),
            });
        }
        Ok(())
    }

    /// Couple `w` directly behind `new_prev`.
    ///
    /// Both link slots must be free: `w` must have no predecessor and
    /// `new_prev` no successor. Use [`Yard::reattach`] to override
    /// existing links.
    pub fn attach(&mut self, w: WagonKey, new_prev: WagonKey) -> Result<(), ChainError> {
        if self.has_previous(w) {
            return Err(ChainError::StructuralConflict {
                wagon: self.id_of(w),
                predecessor: self.id_of(new_prev),
                reason: "wagon already has a predecessor",
            });
        }
        if self.has_next(new_prev) {
            return Err(ChainError::StructuralConflict {
                wagon: self.id_of(w),
                predecessor: self.id_of(new_prev),
                reason: "predecessor already has a successor",
            });
        }
        // Coupling behind our own last wagon would close a loop.
        self.ensure_outside_tail(w, new_prev)?;

        self.wagon_mut(new_prev).next = Some(w);
        self.wagon_mut(w).prev = Some(new_prev);
        trace!(wagon = %self.id_of(w), behind = %self.id_of(new_prev), "attached");
        Ok(())
    }

    /// Uncouple `w` from its predecessor, if any.
    pub fn detach_from_previous(&mut self, w: WagonKey) {
        if let Some(prev) = self.wagon_mut(w).prev.take() {
            self.wagon_mut(prev).next = None;
        }
    }

    /// Uncouple `w` from its successor, if any.
    pub fn detach_tail(&mut self, w: WagonKey) {
        if let Some(next) = self.wagon_mut(w).next.take() {
            self.wagon_mut(next).prev = None;
        }
    }

    /// Couple `w` behind `new_prev`, first breaking whatever links stand in
    /// the way.
    ///
    /// `w` leaves its current predecessor, carrying its tail along, and
    /// `new_prev` drops its current successor, which becomes the head of a
    /// loose chain.
    ///
    /// Fails with [`ChainError::SelfAttachmentConflict`] without touching any
    /// link if `new_prev` is `w` or one of its successors.
    pub fn reattach(&mut self, w: WagonKey, new_prev: WagonKey) -> Result<(), ChainError> {
        self.ensure_outside_tail(w, new_prev)?;
        self.detach_from_previous(w);
        self.detach_tail(new_prev);
        self.attach(w, new_prev)
    }

    /// Take `w` out of its chain, coupling its neighbours to each other.
    ///
    /// Afterwards `w` is a standalone wagon.
    pub fn remove_from_sequence(&mut self, w: WagonKey) {
        let wagon = self.wagon_mut(w);
        let prev = wagon.prev.take();
        let next = wagon.next.take();

        if let Some(prev) = prev {
            self.wagon_mut(prev).next = next;
        }
        if let Some(next) = next {
            self.wagon_mut(next).prev = prev;
        }
    }

    /// Reverse the sequence from `w` through its last successor.
    ///
    /// The predecessor of `w`, if any, ends up coupled to the former last
    /// wagon. Returns the new head of the reversed segment, which is `w`
    /// itself when it has no successor.
    pub fn reverse_sequence(&mut self, w: WagonKey) -> WagonKey {
        if !self.has_next(w) {
            return w;
        }

        let anchor = self.wagon_mut(w).prev.take();
        let mut new_head = w;
        let mut current = Some(w);
        while let Some(key) = current {
            let wagon = self.wagon_mut(key);
            let next = wagon.next;
            wagon.next = wagon.prev;
            wagon.prev = next;
            new_head = key;
            current = next;
        }

        self.wagon_mut(new_head).prev = anchor;
        if let Some(anchor) = anchor {
            self.wagon_mut(anchor).next = Some(new_head);
        }

        trace!(from = %self.id_of(w), new_head = %self.id_of(new_head), "sequence reversed");
        new_head
    }

    /// Couple the given wagons into one chain, in slice order, and return
    /// its head.
    ///
    /// Each step is a plain [`Yard::attach`]. If any step fails, the links
    /// made so far are undone and the error is returned.
    pub fn link_sequence(&mut self, keys: &[WagonKey]) -> Result<Option<WagonKey>, ChainError> {
        for (i, pair) in keys.windows(2).enumerate() {
            if let Err(err) = self.attach(pair[1], pair[0]) {
                for &made in &keys[..i] {
                    self.detach_tail(made);
                }
                return Err(err);
            }
        }
        Ok(keys.first().copied())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A primitive applied to wagon slots picked by index.
    #[derive(Debug, Clone)]
    enum Primitive {
        Attach(usize, usize),
        Reattach(usize, usize),
        DetachFromPrevious(usize),
        DetachTail(usize),
        Remove(usize),
        Reverse(usize),
    }

    fn primitive(n: usize) -> impl Strategy<Value = Primitive> {
        prop_oneof![
            (0..n, 0..n).prop_map(|(a, b)| Primitive::Attach(a, b)),
            (0..n, 0..n).prop_map(|(a, b)| Primitive::Reattach(a, b)),
            (0..n).prop_map(Primitive::DetachFromPrevious),
            (0..n).prop_map(Primitive::DetachTail),
            (0..n).prop_map(Primitive::Remove),
            (0..n).prop_map(Primitive::Reverse),
        ]
    }

    proptest! {
        /// No sequence of primitives can break symmetry or acyclicity,
        /// and failed primitives leave the yard untouched
        #[test]
        fn primitives_preserve_invariants(ops in prop::collection::vec(primitive(8), 1..60)) {
            let mut yard = Yard::new();
            let keys: Vec<WagonKey> = (0..8).map(|id| yard.passenger_wagon(id, 10)).collect();

            for op in ops {
                let before = yard.clone();
                let result = match op {
                    Primitive::Attach(a, b) => yard.attach(keys[a], keys[b]),
                    Primitive::Reattach(a, b) => yard.reattach(keys[a], keys[b]),
                    Primitive::DetachFromPrevious(a) => {
                        yard.detach_from_previous(keys[a]);
                        Ok(())
                    }
                    Primitive::DetachTail(a) => {
                        yard.detach_tail(keys[a]);
                        Ok(())
                    }
                    Primitive::Remove(a) => {
                        yard.remove_from_sequence(keys[a]);
                        Ok(())
                    }
                    Primitive::Reverse(a) => {
                        yard.reverse_sequence(keys[a]);
                        Ok(())
                    }
                };
                if result.is_err() {
                    prop_assert_eq!(&yard, &before);
                }
                prop_assert!(yard.verify_all().is_ok());
            }
        }

        /// Reversing any segment twice is the identity
        #[test]
        fn reverse_twice_is_identity(len in 1usize..30, start in 0usize..30) {
            let mut yard = Yard::new();
            let keys: Vec<WagonKey> = (0..len as u32).map(|id| yard.freight_wagon(id, 5)).collect();
            yard.link_sequence(&keys).unwrap();
            let before = yard.clone();

            let from = keys[start % len];
            let head = yard.reverse_sequence(from);
            let back = yard.reverse_sequence(head);

            prop_assert_eq!(back, from);
            prop_assert_eq!(yard, before);
        }

        /// sequence_length agrees with the number of wagons linked
        #[test]
        fn sequence_length_matches_chain(len in 1usize..50) {
            let mut yard = Yard::new();
            let keys: Vec<WagonKey> = (0..len as u32).map(|id| yard.passenger_wagon(id, 1)).collect();
            yard.link_sequence(&keys).unwrap();

            prop_assert_eq!(yard.sequence_length(keys[0]), len);
            prop_assert_eq!(yard.last_of(keys[0]), keys[len - 1]);
            prop_assert_eq!(yard.first_of(keys[len - 1]), keys[0]);
        }
    }
}
