//! Trains and their composition rules.
//!
//! A [`Train`] owns at most one wagon chain stored in a [`Yard`]. Before any
//! structural change it checks capacity, wagon kind and duplicate
//! membership; only then does it hand the surgery to the yard's chain
//! primitives.
//!
//! Mutating operations return `Ok(true)` on success and `Ok(false)` when a
//! domain rule rejects them, in which case neither the train nor the
//! argument sequence has changed. `Err` is reserved for [`ChainError`]s,
//! which mean the yard was already inconsistent.

mod summary;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ChainError, Locomotive, WagonId, WagonKind};
use crate::yard::{InvariantViolation, SequenceIter, Wagon, WagonKey, Yard};

pub use summary::{TrainDisplay, TrainSummary};

/// Whether a train carries passengers, freight, or nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainKind {
    Empty,
    Passenger,
    Freight,
}

impl From<WagonKind> for TrainKind {
    fn from(kind: WagonKind) -> Self {
        match kind {
            WagonKind::Passenger => TrainKind::Passenger,
            WagonKind::Freight => TrainKind::Freight,
        }
    }
}

/// A locomotive pulling a chain of wagons from one place to another.
///
/// # Examples
///
/// ```
/// use train_shunter::domain::Locomotive;
/// use train_shunter::train::Train;
/// use train_shunter::yard::Yard;
///
/// let mut yard = Yard::new();
/// let mut train = Train::new(Locomotive::new(1, 3).unwrap(), "Amsterdam", "Paris");
///
/// let wagon = yard.passenger_wagon(8001, 40);
/// assert!(train.attach_to_rear(&mut yard, wagon).unwrap());
/// assert_eq!(train.total_seats(&yard), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    engine: Locomotive,
    origin: String,
    destination: String,
    first_wagon: Option<WagonKey>,
}

impl Train {
    /// Create a train without wagons.
    pub fn new(
        engine: Locomotive,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            origin: origin.into(),
            destination: destination.into(),
            first_wagon: None,
        }
    }

    pub fn engine(&self) -> &Locomotive {
        &self.engine
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn first_wagon(&self) -> Option<WagonKey> {
        self.first_wagon
    }

    pub fn has_wagons(&self) -> bool {
        self.first_wagon.is_some()
    }

    /// Replace the whole chain of this train.
    ///
    /// The previous chain, if any, is left in the yard untouched. A new
    /// head that is coupled behind another wagon is uncoupled from it.
    pub fn set_first_wagon(&mut self, yard: &mut Yard, sequence: Option<WagonKey>) {
        if let Some(head) = sequence {
            yard.detach_from_previous(head);
        }
        self.first_wagon = sequence;
    }

    /// Iterate over the keys of this train's wagons, front to back.
    ///
    /// Each call starts afresh from the first wagon.
    pub fn keys<'a>(&self, yard: &'a Yard) -> SequenceIter<'a> {
        SequenceIter::new(yard, self.first_wagon)
    }

    /// Iterate over this train's wagons, front to back.
    pub fn wagons<'a>(&self, yard: &'a Yard) -> impl Iterator<Item = &'a Wagon> + 'a {
        self.keys(yard).map(|key| yard.wagon(key))
    }

    /// Kind of the train, decided by its first wagon.
    pub fn kind(&self, yard: &Yard) -> TrainKind {
        self.first_wagon
            .map_or(TrainKind::Empty, |head| yard.wagon(head).kind().into())
    }

    pub fn is_passenger(&self, yard: &Yard) -> bool {
        self.kind(yard) == TrainKind::Passenger
    }

    pub fn is_freight(&self, yard: &Yard) -> bool {
        self.kind(yard) == TrainKind::Freight
    }

    pub fn wagon_count(&self, yard: &Yard) -> usize {
        self.keys(yard).count()
    }

    pub fn last_wagon(&self, yard: &Yard) -> Option<WagonKey> {
        self.first_wagon.map(|head| yard.last_of(head))
    }

    /// Total seats of a passenger train; 0 for freight or empty trains.
    pub fn total_seats(&self, yard: &Yard) -> u64 {
        if !self.is_passenger(yard) {
            return 0;
        }
        self.wagons(yard).map(|w| u64::from(w.role().seats())).sum()
    }

    /// Total maximum weight of a freight train; 0 for passenger or empty
    /// trains.
    pub fn total_max_weight(&self, yard: &Yard) -> u64 {
        if !self.is_freight(yard) {
            return 0;
        }
        self.wagons(yard)
            .map(|w| u64::from(w.role().max_weight()))
            .sum()
    }

    /// Wagon at a 1-based position.
    pub fn find_at_position(&self, yard: &Yard, position: usize) -> Option<WagonKey> {
        let index = position.checked_sub(1)?;
        self.keys(yard).nth(index)
    }

    /// First wagon with the given id.
    pub fn find_by_id(&self, yard: &Yard, id: WagonId) -> Option<WagonKey> {
        self.keys(yard).find(|&key| yard.id_of(key) == id)
    }

    /// Can the sequence starting at `sequence` be coupled to this train?
    ///
    /// True when the head's id is not already in this train, the engine can
    /// pull the extra wagons, and the sequence's kind matches the train's
    /// (an empty train accepts either kind).
    pub fn can_attach(&self, yard: &Yard, sequence: WagonKey) -> bool {
        self.rejection(yard, sequence, yard.sequence_length(sequence))
            .is_none()
    }

    /// Why `length` wagons headed by `head` cannot join this train, if they
    /// cannot.
    fn rejection(&self, yard: &Yard, head: WagonKey, length: usize) -> Option<&'static str> {
        if self.find_by_id(yard, yard.id_of(head)).is_some() {
            return Some("wagon id already in train");
        }
        let max = self.engine.max_wagons() as usize;
        if self.wagon_count(yard) + length > max {
            return Some("engine capacity exceeded");
        }
        let kind = self.kind(yard);
        if kind != TrainKind::Empty && kind != TrainKind::from(yard.wagon(head).kind()) {
            return Some("wagon kind does not match train");
        }
        None
    }

    fn rejected(&self, yard: &Yard, head: WagonKey, operation: &str, reason: &str) -> bool {
        debug!(
            train = %self.engine,
            wagon = %yard.id_of(head),
            reason,
            "{operation} rejected"
        );
        false
    }

    fn mutated(&self, yard: &Yard, operation: &str) -> bool {
        debug!(
            train = %self.engine,
            count = self.wagon_count(yard),
            "{operation} done"
        );
        if yard.config().verify_after_mutation {
            if let Err(e) = self.verify(yard) {
                warn!(train = %self.engine, error = %e, "wagon chain invariant violated");
            }
        }
        true
    }

    /// The only path that skips `can_attach`: an empty train takes any
    /// sequence as its chain.
    fn adopt(&mut self, yard: &mut Yard, sequence: WagonKey, operation: &str) -> bool {
        yard.detach_from_previous(sequence);
        self.first_wagon = Some(sequence);
        self.mutated(yard, operation)
    }

    /// Couple a sequence behind the last wagon.
    ///
    /// A sequence still coupled behind another wagon is uncoupled from it,
    /// taking its tail along.
    pub fn attach_to_rear(
        &mut self,
        yard: &mut Yard,
        sequence: WagonKey,
    ) -> Result<bool, ChainError> {
        let Some(last) = self.last_wagon(yard) else {
            return Ok(self.adopt(yard, sequence, "attach to rear"));
        };
        if let Some(reason) = self.rejection(yard, sequence, yard.sequence_length(sequence)) {
            return Ok(self.rejected(yard, sequence, "attach to rear", reason));
        }

        if yard.has_previous(sequence) {
            yard.reattach(sequence, last)?;
        } else {
            yard.attach(sequence, last)?;
        }
        Ok(self.mutated(yard, "attach to rear"))
    }

    /// Put a sequence in front of the first wagon.
    pub fn insert_at_front(
        &mut self,
        yard: &mut Yard,
        sequence: WagonKey,
    ) -> Result<bool, ChainError> {
        let Some(first) = self.first_wagon else {
            return Ok(self.adopt(yard, sequence, "insert at front"));
        };
        if let Some(reason) = self.rejection(yard, sequence, yard.sequence_length(sequence)) {
            return Ok(self.rejected(yard, sequence, "insert at front", reason));
        }

        yard.attach(first, yard.last_of(sequence))?;
        yard.detach_from_previous(sequence);
        self.first_wagon = Some(sequence);
        Ok(self.mutated(yard, "insert at front"))
    }

    /// Splice a sequence in so that its head ends up at the 1-based
    /// `position`.
    ///
    /// Position 1 inserts at the front; a position with no wagon in front
    /// of it is rejected.
    pub fn insert_at_position(
        &mut self,
        yard: &mut Yard,
        position: usize,
        sequence: WagonKey,
    ) -> Result<bool, ChainError> {
        if let Some(reason) = self.rejection(yard, sequence, yard.sequence_length(sequence)) {
            return Ok(self.rejected(yard, sequence, "insert at position", reason));
        }
        if position == 1 {
            return self.insert_at_front(yard, sequence);
        }
        let Some(anchor) = position
            .checked_sub(1)
            .and_then(|p| self.find_at_position(yard, p))
        else {
            return Ok(self.rejected(
                yard,
                sequence,
                "insert at position",
                "no such position",
            ));
        };

        let tail = yard.last_of(sequence);
        let displaced = yard.next_of(anchor);
        if let Some(displaced) = displaced {
            // Checked up front so the splice below cannot fail halfway.
            if yard.reaches(displaced, tail) {
                return Err(ChainError::SelfAttachmentConflict {
                    wagon: yard.id_of(displaced),
                    target: yard.id_of(tail),
                });
            }
        }

        yard.reattach(sequence, anchor)?;
        if let Some(displaced) = displaced {
            yard.attach(displaced, tail)?;
        }
        Ok(self.mutated(yard, "insert at position"))
    }

    /// Move the wagon with the given id to the rear of `to_train`.
    ///
    /// The rest of this train closes up behind the gap. Nothing changes if
    /// the wagon is not here or `to_train` would not accept it.
    pub fn move_one_wagon(
        &mut self,
        yard: &mut Yard,
        id: WagonId,
        to_train: &mut Train,
    ) -> Result<bool, ChainError> {
        let Some(wagon) = self.find_by_id(yard, id) else {
            debug!(train = %self.engine, wagon = %id, "move one wagon rejected: not found");
            return Ok(false);
        };
        if let Some(reason) = to_train.rejection(yard, wagon, 1) {
            return Ok(to_train.rejected(yard, wagon, "move one wagon", reason));
        }

        if self.first_wagon == Some(wagon) {
            self.first_wagon = yard.next_of(wagon);
        }
        yard.remove_from_sequence(wagon);
        self.mutated(yard, "move one wagon");

        let attached = to_train.attach_to_rear(yard, wagon)?;
        debug_assert!(attached, "pre-checked wagon was refused");
        Ok(attached)
    }

    /// Move the wagon at `position` and everything behind it to the rear of
    /// `to_train`.
    pub fn split_at_position(
        &mut self,
        yard: &mut Yard,
        position: usize,
        to_train: &mut Train,
    ) -> Result<bool, ChainError> {
        let Some(wagon) = self.find_at_position(yard, position) else {
            debug!(train = %self.engine, position, "split rejected: no such position");
            return Ok(false);
        };
        if let Some(reason) = to_train.rejection(yard, wagon, yard.sequence_length(wagon)) {
            return Ok(to_train.rejected(yard, wagon, "split", reason));
        }

        if self.first_wagon == Some(wagon) {
            self.first_wagon = None;
        }
        yard.detach_from_previous(wagon);
        self.mutated(yard, "split");

        let attached = to_train.attach_to_rear(yard, wagon)?;
        debug_assert!(attached, "pre-checked sequence was refused");
        Ok(attached)
    }

    /// Reverse the order of the wagons.
    pub fn reverse(&mut self, yard: &mut Yard) {
        if let Some(first) = self.first_wagon {
            self.first_wagon = Some(yard.reverse_sequence(first));
            self.mutated(yard, "reverse");
        }
    }

    /// Check the chain invariants for this train's wagons.
    pub fn verify(&self, yard: &Yard) -> Result<(), InvariantViolation> {
        match self.first_wagon {
            Some(head) => yard.verify_head(head),
            None => Ok(()),
        }
    }

    /// Render as `[Loc-N][Wagon-1][Wagon-2] with 2 wagons from A to B`.
    pub fn display<'a>(&'a self, yard: &'a Yard) -> TrainDisplay<'a> {
        TrainDisplay::new(self, yard)
    }

    /// Snapshot of this train for reporting.
    pub fn summary(&self, yard: &Yard) -> TrainSummary {
        TrainSummary {
            engine: self.engine,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            kind: self.kind(yard),
            wagons: self.wagons(yard).map(Wagon::id).collect(),
            total_seats: self.total_seats(yard),
            total_max_weight: self.total_max_weight(yard),
        }
    }
}

#[cfg(test)]
#[path = "train_tests.rs"]
mod tests;
