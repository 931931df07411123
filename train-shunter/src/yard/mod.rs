//! Wagon storage and chain primitives.
//!
//! Every wagon lives in a [`Yard`]. Links between wagons are stored as
//! optional [`WagonKey`]s rather than references, so relinking never
//! fights the borrow checker and a wagon is always owned by exactly one
//! place: the yard's slot vector. Trains only hold the key of their first
//! wagon.
//!
//! The chain primitives (attach, detach, reattach, remove, reverse) are
//! implemented in `chain.rs`; each one keeps the following invariants:
//!
//! - symmetry: `a.next == Some(b)` iff `b.prev == Some(a)`
//! - acyclicity: following `next` from any wagon terminates
//! - a chain's head has no predecessor

mod chain;
mod iter;
mod verify;

use std::fmt;

use tracing::trace;

use crate::config::YardConfig;
use crate::domain::{WagonId, WagonKind, WagonRole};

pub use iter::SequenceIter;
pub use verify::InvariantViolation;

/// Handle to a wagon stored in a [`Yard`].
///
/// Keys are only meaningful for the yard that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WagonKey(usize);

impl WagonKey {
    /// Returns the slot index of this key.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WagonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WagonKey({})", self.0)
    }
}

/// A wagon and its links to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wagon {
    id: WagonId,
    role: WagonRole,
    next: Option<WagonKey>,
    prev: Option<WagonKey>,
}

impl Wagon {
    fn standalone(id: WagonId, role: WagonRole) -> Self {
        Self {
            id,
            role,
            next: None,
            prev: None,
        }
    }

    pub fn id(&self) -> WagonId {
        self.id
    }

    pub fn role(&self) -> WagonRole {
        self.role
    }

    pub fn kind(&self) -> WagonKind {
        self.role.kind()
    }

    /// The wagon coupled behind this one.
    pub fn next(&self) -> Option<WagonKey> {
        self.next
    }

    /// The wagon coupled in front of this one.
    pub fn prev(&self) -> Option<WagonKey> {
        self.prev
    }
}

impl fmt::Display for Wagon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.id)
    }
}

/// Arena holding every wagon that trains can exchange.
///
/// # Examples
///
/// ```
/// use train_shunter::yard::Yard;
///
/// let mut yard = Yard::new();
/// let a = yard.passenger_wagon(1, 40);
/// let b = yard.passenger_wagon(2, 36);
/// yard.attach(b, a).unwrap();
///
/// assert_eq!(yard.sequence_length(a), 2);
/// assert_eq!(yard.last_of(a), b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Yard {
    wagons: Vec<Wagon>,
    config: YardConfig,
}

impl Yard {
    /// Create an empty yard with the default configuration.
    pub fn new() -> Self {
        Self::with_config(YardConfig::default())
    }

    /// Create an empty yard with room for `capacity` wagons.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(YardConfig {
            initial_capacity: capacity,
            ..YardConfig::default()
        })
    }

    /// Create an empty yard with the given configuration.
    pub fn with_config(config: YardConfig) -> Self {
        Self {
            wagons: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    pub fn config(&self) -> &YardConfig {
        &self.config
    }

    /// Add a standalone wagon and return its key.
    pub fn add_wagon(&mut self, id: WagonId, role: WagonRole) -> WagonKey {
        let key = WagonKey(self.wagons.len());
        self.wagons.push(Wagon::standalone(id, role));
        trace!(wagon = %id, key = key.0, "wagon added to yard");
        key
    }

    /// Add a standalone passenger wagon.
    pub fn passenger_wagon(&mut self, id: u32, seats: u32) -> WagonKey {
        self.add_wagon(WagonId::new(id), WagonRole::Passenger { seats })
    }

    /// Add a standalone freight wagon.
    pub fn freight_wagon(&mut self, id: u32, max_weight: u32) -> WagonKey {
        self.add_wagon(WagonId::new(id), WagonRole::Freight { max_weight })
    }

    /// Returns the wagon behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` was issued by another yard with more wagons.
    pub fn wagon(&self, key: WagonKey) -> &Wagon {
        &self.wagons[key.0]
    }

    fn wagon_mut(&mut self, key: WagonKey) -> &mut Wagon {
        &mut self.wagons[key.0]
    }

    /// Shorthand for `self.wagon(key).id()`.
    pub fn id_of(&self, key: WagonKey) -> WagonId {
        self.wagon(key).id
    }

    /// Returns the number of wagons in the yard.
    pub fn len(&self) -> usize {
        self.wagons.len()
    }

    /// Returns true if the yard holds no wagons.
    pub fn is_empty(&self) -> bool {
        self.wagons.is_empty()
    }

    /// Iterate over every wagon in the yard, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (WagonKey, &Wagon)> {
        self.wagons
            .iter()
            .enumerate()
            .map(|(i, wagon)| (WagonKey(i), wagon))
    }
}
