//! Domain types for train composition.
//!
//! This module contains the value types shared by the yard and the trains:
//! wagon identity and role, the locomotive descriptor, and the structural
//! error type. All types enforce their invariants at construction time.

mod error;
mod locomotive;
mod wagon;

pub use error::ChainError;
pub use locomotive::{InvalidLocomotive, Locomotive};
pub use wagon::{WagonId, WagonKind, WagonRole};
