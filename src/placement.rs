//! Fleet layout: validation of hand-placed ships and bounded random layout
//! for the computer.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use log::debug;
use rand::Rng;

use crate::bitboard::Occupancy;
use crate::board::{parse_coordinate, project_line, Coordinate, Orientation};
use crate::common::GameError;
use crate::config::DEFAULT_PLACEMENT_ATTEMPTS;
use crate::ship::ShipType;

/// Check a hand-placed ship: exactly `ship_type.size()` cells, none repeated.
pub fn validate_manual(ship_type: ShipType, coordinates: &[Coordinate]) -> Result<(), GameError> {
    if coordinates.len() != ship_type.size() {
        return Err(GameError::SizeMismatch {
            expected: ship_type.size(),
            actual: coordinates.len(),
        });
    }
    let mut seen = Occupancy::new();
    for &cell in coordinates {
        if seen.contains(cell) {
            return Err(GameError::DuplicatePlacement);
        }
        seen.insert(cell)?;
    }
    Ok(())
}

/// Parse and validate a hand-placed ship given as coordinate strings.
pub fn parse_manual<S: AsRef<str>>(
    ship_type: ShipType,
    coordinates: &[S],
) -> Result<Vec<Coordinate>, GameError> {
    let cells = coordinates
        .iter()
        .map(|c| parse_coordinate(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    validate_manual(ship_type, &cells)?;
    Ok(cells)
}

/// Random ship layout for one owner, with a cap on attempts per ship.
#[derive(Debug, Clone)]
pub struct AutoPlacer {
    occupied: Occupancy,
    max_attempts: usize,
}

impl Default for AutoPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEMENT_ATTEMPTS)
    }
}

impl AutoPlacer {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            occupied: Occupancy::new(),
            max_attempts,
        }
    }

    /// Placer that must also keep clear of `occupied`.
    pub fn with_occupied(occupied: Occupancy, max_attempts: usize) -> Self {
        Self {
            occupied,
            max_attempts,
        }
    }

    /// Cells accepted so far.
    pub fn occupied(&self) -> Occupancy {
        self.occupied
    }

    /// Sample a start cell and orientation until the line fits the grid and
    /// misses every accepted cell. The accepted line is recorded as occupied.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<Vec<Coordinate>, GameError> {
        for attempt in 1..=self.max_attempts {
            let start = Coordinate::random(rng);
            let orientation = Orientation::random(rng);
            let line = match project_line(start, orientation, ship_type.size()) {
                Ok(line) => line,
                Err(_) => continue,
            };
            let candidate = Occupancy::from_cells(line.iter().copied())?;
            if !self.occupied.is_disjoint(&candidate) {
                continue;
            }
            debug!(
                "placed {} at {} {:?} after {} attempt(s)",
                ship_type, start, orientation, attempt
            );
            self.occupied = self.occupied | candidate;
            return Ok(line);
        }
        Err(GameError::PlacementFailed {
            ship: ship_type,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FLEET;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn manual_size_is_checked() {
        let err = parse_manual(ShipType::Destroyer1, &["A1", "A2", "A3"]).unwrap_err();
        assert_eq!(err, GameError::SizeMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn manual_repeated_cell_rejected() {
        let err = parse_manual(ShipType::Destroyer2, &["A1", "A2", "A2", "A3"]).unwrap_err();
        assert_eq!(err, GameError::DuplicatePlacement);
    }

    #[test]
    fn manual_bad_coordinate_rejected() {
        let err = parse_manual(ShipType::Destroyer2, &["A1", "A2", "A3", "K4"]).unwrap_err();
        assert_eq!(err, GameError::MalformedCoordinate);
    }

    #[test]
    fn auto_fleet_is_disjoint() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut placer = AutoPlacer::default();
        let mut total = 0;
        for ship in FLEET {
            let line = placer.place(&mut rng, ship).unwrap();
            assert_eq!(line.len(), ship.size());
            total += line.len();
        }
        assert_eq!(placer.occupied().count_ones(), total);
    }

    #[test]
    fn keeps_clear_of_existing_cells() {
        let taken = ["A1", "B1", "C1", "D1", "E1", "F1", "G1", "H1", "I1", "J1"];
        let occupied =
            Occupancy::from_cells(taken.iter().map(|c| parse_coordinate(c).unwrap())).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut placer = AutoPlacer::with_occupied(occupied, DEFAULT_PLACEMENT_ATTEMPTS);
        for ship in FLEET {
            let line = placer.place(&mut rng, ship).unwrap();
            assert!(line.iter().all(|c| !occupied.contains(*c)));
        }
        assert_eq!(placer.occupied().count_ones(), taken.len() + 13);
    }

    #[test]
    fn zero_attempts_fails_immediately() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut placer = AutoPlacer::new(0);
        assert_eq!(
            placer.place(&mut rng, ShipType::Battleship),
            Err(GameError::PlacementFailed { ship: ShipType::Battleship, attempts: 0 })
        );
    }
}
