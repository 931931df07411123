//! Invariant checks over wagon chains.
//!
//! The primitives keep the invariants on their own; these checks exist for
//! tests and for the opt-in post-mutation verification of trains.

use crate::domain::WagonId;

use super::{WagonKey, Yard};

/// A broken chain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// `wagon.next` points at a wagon whose `prev` is not `wagon`
    #[error("{wagon} is coupled to {next} behind it, but not the other way round")]
    AsymmetricNext { wagon: WagonId, next: WagonId },

    /// `wagon.prev` points at a wagon whose `next` is not `wagon`
    #[error("{wagon} is coupled to {prev} in front of it, but not the other way round")]
    AsymmetricPrev { wagon: WagonId, prev: WagonId },

    /// Following the links from this wagon never ends
    #[error("chain through {wagon} loops back on itself")]
    Cycle { wagon: WagonId },

    /// A wagon designated as a head has a predecessor
    #[error("head wagon {wagon} has a predecessor")]
    HeadHasPredecessor { wagon: WagonId },
}

impl Yard {
    /// Check symmetry and acyclicity of the whole chain `w` belongs to.
    ///
    /// Both walks are bounded by the yard size, so a corrupted chain is
    /// reported rather than looped over.
    pub fn verify_chain(&self, w: WagonKey) -> Result<(), InvariantViolation> {
        let limit = self.len();

        let mut head = w;
        let mut steps = 0;
        while let Some(prev) = self.wagon(head).prev {
            if self.wagon(prev).next != Some(head) {
                return Err(InvariantViolation::AsymmetricPrev {
                    wagon: self.id_of(head),
                    prev: self.id_of(prev),
                });
            }
            head = prev;
            steps += 1;
            if steps > limit {
                return Err(InvariantViolation::Cycle {
                    wagon: self.id_of(w),
                });
            }
        }

        let mut current = head;
        let mut steps = 0;
        while let Some(next) = self.wagon(current).next {
            if self.wagon(next).prev != Some(current) {
                return Err(InvariantViolation::AsymmetricNext {
                    wagon: self.id_of(current),
                    next: self.id_of(next),
                });
            }
            current = next;
            steps += 1;
            if steps > limit {
                return Err(InvariantViolation::Cycle {
                    wagon: self.id_of(w),
                });
            }
        }
        Ok(())
    }

    /// Like [`Yard::verify_chain`], additionally requiring `head` to have no
    /// predecessor.
    pub fn verify_head(&self, head: WagonKey) -> Result<(), InvariantViolation> {
        if self.has_previous(head) {
            return Err(InvariantViolation::HeadHasPredecessor {
                wagon: self.id_of(head),
            });
        }
        self.verify_chain(head)
    }

    /// Check every wagon in the yard, including ones caught in a headless
    /// loop.
    pub fn verify_all(&self) -> Result<(), InvariantViolation> {
        self.iter().try_for_each(|(key, _)| self.verify_chain(key))
    }
}
