//! Locomotive descriptor.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Error returned when building a locomotive with invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid locomotive: {reason}")]
pub struct InvalidLocomotive {
    reason: &'static str,
}

/// The engine pulling a train.
///
/// A locomotive can always pull at least one wagon; `max_wagons` is
/// guaranteed positive by construction.
///
/// # Examples
///
/// ```
/// use train_shunter::domain::Locomotive;
///
/// let loco = Locomotive::new(24531, 7).unwrap();
/// assert_eq!(loco.max_wagons(), 7);
/// assert_eq!(loco.to_string(), "[Loc-24531]");
///
/// // An engine that cannot pull anything is rejected
/// assert!(Locomotive::new(1, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locomotive {
    number: u32,
    max_wagons: NonZeroU32,
}

impl Locomotive {
    /// Create a locomotive with the given running number and wagon capacity.
    ///
    /// Returns an error if `max_wagons` is zero.
    pub fn new(number: u32, max_wagons: u32) -> Result<Self, InvalidLocomotive> {
        let max_wagons = NonZeroU32::new(max_wagons).ok_or(InvalidLocomotive {
            reason: "max_wagons must be positive",
        })?;
        Ok(Self { number, max_wagons })
    }

    /// Returns the running number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the maximum number of wagons this engine can pull.
    pub fn max_wagons(&self) -> u32 {
        self.max_wagons.get()
    }
}

impl fmt::Display for Locomotive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Loc-{}]", self.number)
    }
}
