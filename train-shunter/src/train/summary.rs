//! Read-only views of a train for reporting collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Locomotive, WagonId};
use crate::yard::Yard;

use super::{Train, TrainKind};

/// Serializable snapshot of a train's composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub engine: Locomotive,
    pub origin: String,
    pub destination: String,
    pub kind: TrainKind,
    /// Wagon ids, front to back.
    pub wagons: Vec<WagonId>,
    pub total_seats: u64,
    pub total_max_weight: u64,
}

impl TrainSummary {
    pub fn wagon_count(&self) -> usize {
        self.wagons.len()
    }
}

/// Helper for displaying a train together with the yard holding its wagons.
///
/// Created by [`Train::display`].
pub struct TrainDisplay<'a> {
    train: &'a Train,
    yard: &'a Yard,
}

impl<'a> TrainDisplay<'a> {
    pub(super) fn new(train: &'a Train, yard: &'a Yard) -> Self {
        Self { train, yard }
    }
}

impl fmt::Display for TrainDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.train.engine)?;
        let mut count = 0;
        for wagon in self.train.wagons(self.yard) {
            write!(f, "{}", wagon)?;
            count += 1;
        }
        write!(
            f,
            " with {} wagons from {} to {}",
            count, self.train.origin, self.train.destination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loco() -> Locomotive {
        Locomotive::new(24531, 5).unwrap()
    }

    #[test]
    fn display_lists_engine_and_wagons() {
        let mut yard = Yard::new();
        let mut train = Train::new(loco(), "Amsterdam", "Paris");
        let a = yard.passenger_wagon(8001, 40);
        let b = yard.passenger_wagon(8002, 36);
        train.attach_to_rear(&mut yard, a).unwrap();
        train.attach_to_rear(&mut yard, b).unwrap();

        assert_eq!(
            train.display(&yard).to_string(),
            "[Loc-24531][Wagon-8001][Wagon-8002] with 2 wagons from Amsterdam to Paris"
        );
    }

    #[test]
    fn display_empty_train() {
        let yard = Yard::new();
        let train = Train::new(loco(), "Amsterdam", "Paris");

        assert_eq!(
            train.display(&yard).to_string(),
            "[Loc-24531] with 0 wagons from Amsterdam to Paris"
        );
    }

    #[test]
    fn summary_of_freight_train() {
        let mut yard = Yard::new();
        let mut train = Train::new(loco(), "Rotterdam", "Duisburg");
        let a = yard.freight_wagon(9001, 50_000);
        let b = yard.freight_wagon(9002, 60_000);
        train.attach_to_rear(&mut yard, a).unwrap();
        train.attach_to_rear(&mut yard, b).unwrap();

        let summary = train.summary(&yard);
        assert_eq!(summary.kind, TrainKind::Freight);
        assert_eq!(summary.wagons, vec![WagonId::new(9001), WagonId::new(9002)]);
        assert_eq!(summary.wagon_count(), 2);
        assert_eq!(summary.total_seats, 0);
        assert_eq!(summary.total_max_weight, 110_000);
        assert_eq!(summary.origin, "Rotterdam");
        assert_eq!(summary.destination, "Duisburg");
    }

    #[test]
    fn summary_serializes() {
        let mut yard = Yard::new();
        let mut train = Train::new(Locomotive::new(1, 2).unwrap(), "A", "B");
        let a = yard.passenger_wagon(7, 40);
        train.attach_to_rear(&mut yard, a).unwrap();

        let json = serde_json::to_value(train.summary(&yard)).unwrap();
        assert_eq!(json["kind"], "passenger");
        assert_eq!(json["wagons"], serde_json::json!([7]));
        assert_eq!(json["total_seats"], 40);
        assert_eq!(json["engine"]["max_wagons"], 2);

        let back: TrainSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, train.summary(&yard));
    }
}
