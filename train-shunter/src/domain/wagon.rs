//! Wagon identity and role types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a wagon.
///
/// Ids are scoped to a single train: two trains may each carry a wagon
/// with the same id, but a train never accepts a sequence whose head id it
/// already carries.
///
/// # Examples
///
/// ```
/// use train_shunter::domain::WagonId;
///
/// let id = WagonId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "Wagon-7");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WagonId(u32);

impl WagonId {
    /// Creates a wagon id from its number.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the wagon number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for WagonId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for WagonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WagonId({})", self.0)
    }
}

impl fmt::Display for WagonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wagon-{}", self.0)
    }
}

/// What a wagon carries, without the payload figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagonKind {
    Passenger,
    Freight,
}

/// The role of a wagon, fixed when the wagon is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WagonRole {
    /// Carries passengers.
    Passenger { seats: u32 },
    /// Carries goods up to a weight limit.
    Freight { max_weight: u32 },
}

impl WagonRole {
    /// Returns the kind of this role.
    pub fn kind(&self) -> WagonKind {
        match self {
            WagonRole::Passenger { .. } => WagonKind::Passenger,
            WagonRole::Freight { .. } => WagonKind::Freight,
        }
    }

    /// Number of seats, or 0 for a freight wagon.
    pub fn seats(&self) -> u32 {
        match self {
            WagonRole::Passenger { seats } => *seats,
            WagonRole::Freight { .. } => 0,
        }
    }

    /// Maximum load weight, or 0 for a passenger wagon.
    pub fn max_weight(&self) -> u32 {
        match self {
            WagonRole::Passenger { .. } => 0,
            WagonRole::Freight { max_weight } => *max_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_and_debug() {
        let id = WagonId::new(12);
        assert_eq!(format!("{}", id), "Wagon-12");
        assert_eq!(format!("{:?}", id), "WagonId(12)");
    }

    #[test]
    fn id_from_u32() {
        assert_eq!(WagonId::from(3), WagonId::new(3));
    }

    #[test]
    fn role_kind() {
        assert_eq!(
            WagonRole::Passenger { seats: 40 }.kind(),
            WagonKind::Passenger
        );
        assert_eq!(
            WagonRole::Freight { max_weight: 500 }.kind(),
            WagonKind::Freight
        );
    }

    #[test]
    fn role_payload_figures() {
        let passenger = WagonRole::Passenger { seats: 40 };
        assert_eq!(passenger.seats(), 40);
        assert_eq!(passenger.max_weight(), 0);

        let freight = WagonRole::Freight { max_weight: 500 };
        assert_eq!(freight.seats(), 0);
        assert_eq!(freight.max_weight(), 500);
    }

    #[test]
    fn role_serde_shape() {
        let json = serde_json::to_string(&WagonRole::Freight { max_weight: 500 }).unwrap();
        assert_eq!(json, r#"{"kind":"freight","max_weight":500}"#);

        let role: WagonRole = serde_json::from_str(r#"{"kind":"passenger","seats":24}"#).unwrap();
        assert_eq!(role, WagonRole::Passenger { seats: 24 });
    }

    #[test]
    fn id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&WagonId::new(9)).unwrap(), "9");
    }
}
